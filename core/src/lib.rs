#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use analysis::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use save::*;
pub use score::*;
pub use session::*;
pub use tile::*;
pub use types::*;

mod analysis;
mod engine;
mod error;
mod generator;
mod save;
mod score;
mod session;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the square board.
    pub size: Coord,
    /// Number of palette entries in play.
    pub colors: u8,
    /// Minimum run length that clears.
    pub connect: u8,
    /// Balls spawned per turn, also the preview length.
    pub spawn_batch: u8,
}

impl GameConfig {
    /// 9×9 board, seven colors, lines of five, three new balls per turn.
    pub const CLASSIC: Self = Self::new_unchecked(9, 7, 5, 3);

    pub const fn new_unchecked(size: Coord, colors: u8, connect: u8, spawn_batch: u8) -> Self {
        Self {
            size,
            colors,
            connect,
            spawn_batch,
        }
    }

    pub fn new(size: Coord, colors: u8, connect: u8, spawn_batch: u8) -> Self {
        let connect = connect.max(2);
        let size = size.max(connect);
        let colors = colors.clamp(1, BallColor::ALL.len() as u8);
        let spawn_batch = u16::from(spawn_batch).clamp(1, mult(size, size)) as u8;
        Self::new_unchecked(size, colors, connect, spawn_batch)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }

    pub const fn dim(&self) -> Coord2 {
        (self.size, self.size)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::CLASSIC
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Illegal move, nothing changed.
    Rejected,
    /// The move completed a line; no balls were spawned.
    Cleared(ClearReport),
    /// New balls were spawned, possibly completing lines themselves.
    Spawned(ClearReport),
    /// Spawning failed or filled the board.
    GameOver(ClearReport),
}

impl MoveOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Rejected)
    }

    pub const fn is_game_over(self) -> bool {
        matches!(self, Self::GameOver(_))
    }

    /// Clear report of the detection pass that ran last during the turn.
    pub const fn report(self) -> Option<ClearReport> {
        use MoveOutcome::*;
        match self {
            Rejected => None,
            Cleared(report) | Spawned(report) | GameOver(report) => Some(report),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    NoChange,
    Selected(Coord2),
    /// A move was attempted but was illegal; the selection is gone.
    Deselected,
    Moved(MoveOutcome),
}

impl ClickOutcome {
    pub const fn has_update(self) -> bool {
        use ClickOutcome::*;
        match self {
            NoChange => false,
            Selected(_) => true,
            Deselected => true,
            Moved(outcome) => outcome.has_update(),
        }
    }

    pub const fn is_game_over(self) -> bool {
        matches!(self, Self::Moved(outcome) if outcome.is_game_over())
    }
}
