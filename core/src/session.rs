use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::*;

/// Durable storage for the single saved game.
pub trait SaveStore {
    type Error: Debug;

    /// Returns the stored bytes, or `None` when nothing was saved yet.
    fn load(&mut self) -> core::result::Result<Option<Vec<u8>>, Self::Error>;

    fn save(&mut self, bytes: &[u8]) -> core::result::Result<(), Self::Error>;
}

/// In-memory store, mostly useful for tests and previews.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    pub bytes: Option<Vec<u8>>,
}

impl SaveStore for MemoryStore {
    type Error = core::convert::Infallible;

    fn load(&mut self) -> core::result::Result<Option<Vec<u8>>, Self::Error> {
        Ok(self.bytes.clone())
    }

    fn save(&mut self, bytes: &[u8]) -> core::result::Result<(), Self::Error> {
        self.bytes = Some(bytes.to_vec());
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// The board, preview, selection or score changed and should be redrawn.
    BoardChanged,
    /// No more moves; the player has to restart or quit.
    GameOver { score: u32 },
    /// The game could not be persisted. Play continues in memory.
    SaveFailed,
}

type Listener = Box<dyn FnMut(&GameEvent)>;

/// A running game: engine, scores and the store they are persisted to.
pub struct Session<S, G = RandomBallGenerator> {
    engine: BoardEngine<G>,
    scores: Scoreboard,
    store: S,
    listeners: Vec<Listener>,
}

impl<S: SaveStore, G: BallGenerator> Session<S, G> {
    /// Resumes the saved game, or starts a new one when no usable save exists.
    pub fn open(config: GameConfig, generator: G, mut store: S) -> Self {
        let mut engine = BoardEngine::new(config, generator);
        let mut scores = Scoreboard::default();

        let restored = match store.load() {
            Ok(Some(bytes)) => SaveRecord::from_json(&bytes)
                .and_then(|record| record.apply(&mut engine, &mut scores))
                .inspect_err(|err| log::warn!("Ignoring saved game: {}", err))
                .is_ok(),
            Ok(None) => false,
            Err(err) => {
                log::warn!("Could not read saved game: {:?}", err);
                false
            }
        };

        let mut session = Self {
            engine,
            scores,
            store,
            listeners: Vec::new(),
        };
        if restored {
            log::info!("Resumed saved game, score {}", session.scores.score());
        } else {
            session.start_new_game();
        }
        session
    }

    pub fn engine(&self) -> &BoardEngine<G> {
        &self.engine
    }

    pub fn scores(&self) -> &Scoreboard {
        &self.scores
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&GameEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Forwards a cell click to the engine and persists the result.
    pub fn click(&mut self, coords: Coord2) -> ClickOutcome {
        let outcome = self.engine.click(coords, &mut self.scores);
        if outcome.has_update() {
            self.emit(GameEvent::BoardChanged);
            self.save();
        }
        if outcome.is_game_over() {
            log::info!("Game over, final score {}", self.scores.score());
            self.emit(GameEvent::GameOver {
                score: self.scores.score(),
            });
        }
        outcome
    }

    pub fn start_new_game(&mut self) -> MoveOutcome {
        let outcome = self.engine.start_new_game(&mut self.scores);
        self.emit(GameEvent::BoardChanged);
        self.save();
        outcome
    }

    /// Writes the current game to the store. Failures are logged and broadcast.
    pub fn save(&mut self) -> bool {
        let record = SaveRecord::capture(&self.engine, &self.scores);
        let saved = match record.to_json() {
            Ok(json) => match self.store.save(json.as_bytes()) {
                Ok(()) => true,
                Err(err) => {
                    log::error!("Could not save game: {:?}", err);
                    false
                }
            },
            Err(_) => false,
        };
        if !saved {
            self.emit(GameEvent::SaveFailed);
        }
        saved
    }

    fn emit(&mut self, event: GameEvent) {
        for listener in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}
