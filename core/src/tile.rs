use serde::{Deserialize, Serialize};

/// Fixed ball palette. The discriminant doubles as the save-file index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum BallColor {
    Red,
    Green,
    Blue,
    Yellow,
    Magenta,
    Cyan,
    Brown,
}

impl BallColor {
    pub const ALL: [BallColor; 7] = [
        Self::Red,
        Self::Green,
        Self::Blue,
        Self::Yellow,
        Self::Magenta,
        Self::Cyan,
        Self::Brown,
    ];

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }
}

/// Canonical cell state stored by the board engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Ball(BallColor),
}

impl Cell {
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn color(self) -> Option<BallColor> {
        match self {
            Self::Empty => None,
            Self::Ball(color) => Some(color),
        }
    }

    /// Palette index of the ball, or `-1` for an empty cell.
    pub const fn to_index(self) -> i8 {
        match self {
            Self::Empty => -1,
            Self::Ball(color) => color.index() as i8,
        }
    }

    /// Decodes a save-file index against a palette of `colors` entries.
    pub fn from_index(index: i8, colors: u8) -> Option<Self> {
        match index {
            -1 => Some(Self::Empty),
            0.. if (index as u8) < colors => BallColor::from_index(index as u8).map(Self::Ball),
            _ => None,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Empty
    }
}

impl From<BallColor> for Cell {
    fn from(color: BallColor) -> Self {
        Self::Ball(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_encoding_uses_minus_one_for_empty() {
        assert_eq!(Cell::Empty.to_index(), -1);
        assert_eq!(Cell::Ball(BallColor::Blue).to_index(), 2);
        assert_eq!(Cell::from_index(-1, 7), Some(Cell::Empty));
        assert_eq!(Cell::from_index(6, 7), Some(Cell::Ball(BallColor::Brown)));
        assert_eq!(Cell::from(BallColor::Brown).to_index(), 6);
    }

    #[test]
    fn from_index_rejects_values_outside_palette() {
        assert_eq!(Cell::from_index(7, 7), None);
        assert_eq!(Cell::from_index(5, 5), None);
        assert_eq!(Cell::from_index(-2, 7), None);
    }
}
