use alloc::string::String;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Persisted snapshot of a game. Selection is never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRecord {
    pub version: u32,
    pub size: Coord,
    pub colors: u8,
    /// Palette index per cell, row by row, `-1` for empty.
    pub board_colors: Vec<Vec<i8>>,
    pub next_colors: Vec<i8>,
    pub score: u32,
    pub high_score: u32,
}

impl SaveRecord {
    pub const VERSION: u32 = 1;

    pub fn capture<G: BallGenerator>(engine: &BoardEngine<G>, scores: &impl ScoreTracker) -> Self {
        let board_colors = engine
            .cells()
            .rows()
            .into_iter()
            .map(|row| row.iter().map(|cell| cell.to_index()).collect())
            .collect();
        let next_colors = engine
            .next_colors()
            .iter()
            .map(|&color| Cell::Ball(color).to_index())
            .collect();
        let config = engine.config();

        Self {
            version: Self::VERSION,
            size: config.size,
            colors: config.colors,
            board_colors,
            next_colors,
            score: scores.score(),
            high_score: scores.high_score(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|err| {
            log::error!("Could not encode save record: {}", err);
            GameError::MalformedSave
        })
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|err| {
            log::debug!("Could not decode save record: {}", err);
            GameError::MalformedSave
        })
    }

    /// Loads the record into `engine` and `scores`.
    ///
    /// The whole record is checked first; on error nothing is modified.
    pub fn apply<G: BallGenerator>(
        &self,
        engine: &mut BoardEngine<G>,
        scores: &mut impl ScoreTracker,
    ) -> Result<()> {
        let (board, next_colors) = self.decode(engine.config())?;
        engine.restore(board, next_colors);
        scores.set_score(self.score);
        scores.set_high_score(self.high_score);
        Ok(())
    }

    fn decode(&self, config: GameConfig) -> Result<(Array2<Cell>, Vec<BallColor>)> {
        if self.version != Self::VERSION {
            return Err(GameError::UnsupportedVersion(self.version));
        }

        if self.size != config.size
            || self.colors != config.colors
            || self.board_colors.len() != usize::from(config.size)
            || self
                .board_colors
                .iter()
                .any(|row| row.len() != usize::from(config.size))
        {
            return Err(GameError::InvalidBoardShape);
        }

        if self.high_score < self.score {
            return Err(GameError::InconsistentScore);
        }

        let mut board: Array2<Cell> = Array2::default(config.dim().to_nd_index());
        for (pos, &index) in iter_coords(config.dim()).zip(self.board_colors.iter().flatten()) {
            board[pos.to_nd_index()] =
                Cell::from_index(index, config.colors).ok_or(GameError::InvalidColorIndex(index))?;
        }

        if self.next_colors.len() != usize::from(config.spawn_batch) {
            return Err(GameError::InvalidPreview);
        }
        let next_colors = self
            .next_colors
            .iter()
            .map(|&index| match Cell::from_index(index, config.colors) {
                Some(Cell::Ball(color)) => Ok(color),
                Some(Cell::Empty) => Err(GameError::InvalidPreview),
                None => Err(GameError::InvalidColorIndex(index)),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok((board, next_colors))
    }
}
