use alloc::vec::Vec;
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Active,
    Over,
}

impl EngineState {
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Over)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Active
    }
}

/// Owns the board and applies every rule of the game to it.
///
/// Scores are reported to the [`ScoreTracker`] passed into each turn, so the
/// engine itself holds no score state.
#[derive(Clone, Debug)]
pub struct BoardEngine<G = RandomBallGenerator> {
    config: GameConfig,
    board: Array2<Cell>,
    selected: Option<Coord2>,
    next_colors: Vec<BallColor>,
    state: EngineState,
    generator: G,
}

impl BoardEngine<RandomBallGenerator> {
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::new(config, RandomBallGenerator::new(seed))
    }
}

impl<G: BallGenerator> BoardEngine<G> {
    /// Creates an empty board with a fresh preview; no balls are placed yet.
    pub fn new(config: GameConfig, mut generator: G) -> Self {
        let next_colors = generator.pick_colors(config.spawn_batch, config.colors);
        Self {
            config,
            board: Array2::default(config.dim().to_nd_index()),
            selected: None,
            next_colors,
            state: Default::default(),
            generator,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.dim()
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.board[coords.to_nd_index()]
    }

    pub fn cells(&self) -> ArrayView2<'_, Cell> {
        self.board.view()
    }

    pub fn selected(&self) -> Option<Coord2> {
        self.selected
    }

    pub fn next_colors(&self) -> &[BallColor] {
        &self.next_colors
    }

    pub fn empty_count(&self) -> CellCount {
        self.board
            .iter()
            .filter(|cell| cell.is_empty())
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    pub fn is_full(&self) -> bool {
        self.board.iter().all(|cell| !cell.is_empty())
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Writes a cell directly, bypassing the rules. Meant for fixtures and editors.
    pub fn place(&mut self, coords: Coord2, cell: Cell) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        self.board[coords.to_nd_index()] = cell;
        if cell.is_empty() && self.selected == Some(coords) {
            self.selected = None;
        }
        Ok(())
    }

    /// Handles a click on a cell: selects balls and moves the selected ball to empty cells.
    pub fn click(&mut self, coords: Coord2, scores: &mut impl ScoreTracker) -> ClickOutcome {
        use ClickOutcome::*;

        if self.state.is_over() {
            log::trace!("click at {:?} ignored, game is over", coords);
            return NoChange;
        }

        let coords = match self.validate_coords(coords) {
            Ok(coords) => coords,
            Err(err) => {
                log::warn!("click at {:?} rejected: {}", coords, err);
                return NoChange;
            }
        };

        match (self.cell_at(coords), self.selected) {
            (Cell::Ball(_), Some(selected)) if selected == coords => NoChange,
            (Cell::Ball(_), _) => {
                log::trace!("select {:?}", coords);
                self.selected = Some(coords);
                Selected(coords)
            }
            (Cell::Empty, None) => NoChange,
            (Cell::Empty, Some(from)) => {
                self.selected = None;
                match self.move_ball(from, coords, scores) {
                    MoveOutcome::Rejected => Deselected,
                    outcome => Moved(outcome),
                }
            }
        }
    }

    /// Whether a ball at `from` may move to `to`.
    pub fn can_move(&self, from: Coord2, to: Coord2) -> bool {
        if self.validate_coords(from).is_err() || self.validate_coords(to).is_err() {
            return false;
        }
        !self.cell_at(from).is_empty() && self.cell_at(to).is_empty() && has_path(&self.board, from, to)
    }

    /// Plays a full turn: move, then either score the lines it made or spawn new balls.
    ///
    /// Illegal moves are ignored and reported as [`MoveOutcome::Rejected`].
    pub fn move_ball(&mut self, from: Coord2, to: Coord2, scores: &mut impl ScoreTracker) -> MoveOutcome {
        if self.state.is_over() || !self.can_move(from, to) {
            log::debug!("move {:?} -> {:?} rejected", from, to);
            return MoveOutcome::Rejected;
        }

        self.board[to.to_nd_index()] = self.board[from.to_nd_index()];
        self.board[from.to_nd_index()] = Cell::Empty;
        self.selected = None;

        let report = self.clear_matches(scores);
        if !report.is_empty() {
            self.regenerate_preview();
            return MoveOutcome::Cleared(report);
        }

        self.spawn_turn(scores)
    }

    /// Removes every completed line and awards its points.
    pub fn clear_matches(&mut self, scores: &mut impl ScoreTracker) -> ClearReport {
        let report = clear_lines(&mut self.board, self.config.connect);
        if report.is_empty() {
            return report;
        }

        if let Some(selected) = self.selected {
            if self.cell_at(selected).is_empty() {
                self.selected = None;
            }
        }

        log::debug!(
            "cleared {} balls ({} bonus) for {} points",
            report.cleared,
            report.bonus,
            report.points()
        );
        scores.add(report.points());
        scores.update_high_score();
        report
    }

    /// Resets score, board and selection, then spawns the first batch.
    pub fn start_new_game(&mut self, scores: &mut impl ScoreTracker) -> MoveOutcome {
        scores.reset();
        self.board.fill(Cell::Empty);
        self.selected = None;
        self.state = EngineState::Active;
        self.regenerate_preview();
        self.spawn_turn(scores)
    }

    /// Drops the preview onto random empty cells and checks the lines they complete.
    fn spawn_turn(&mut self, scores: &mut impl ScoreTracker) -> MoveOutcome {
        let empty: Vec<Coord2> = iter_coords(self.size())
            .filter(|&pos| self.cell_at(pos).is_empty())
            .collect();

        if empty.len() < self.next_colors.len() {
            log::debug!(
                "cannot spawn {} balls into {} empty cells, game over",
                self.next_colors.len(),
                empty.len()
            );
            self.state = EngineState::Over;
            return MoveOutcome::GameOver(ClearReport::default());
        }

        let count = self.next_colors.len() as u8;
        let cells = self.generator.pick_cells(empty, count);
        for (pos, &color) in cells.into_iter().zip(self.next_colors.iter()) {
            self.board[pos.to_nd_index()] = color.into();
        }
        self.regenerate_preview();

        let report = self.clear_matches(scores);
        if self.is_full() {
            log::debug!("board is full, game over");
            self.state = EngineState::Over;
            MoveOutcome::GameOver(report)
        } else {
            MoveOutcome::Spawned(report)
        }
    }

    fn regenerate_preview(&mut self) {
        self.next_colors = self
            .generator
            .pick_colors(self.config.spawn_batch, self.config.colors);
    }

    /// Replaces board and preview with already validated saved contents.
    pub(crate) fn restore(&mut self, board: Array2<Cell>, next_colors: Vec<BallColor>) {
        self.board = board;
        self.next_colors = next_colors;
        self.selected = None;
        self.state = if self.is_full() {
            EngineState::Over
        } else {
            EngineState::Active
        };
    }
}
