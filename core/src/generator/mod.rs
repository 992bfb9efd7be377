use alloc::vec::Vec;

use crate::*;
pub use random::*;

mod random;

/// Source of every random decision the engine makes.
pub trait BallGenerator {
    /// Picks `count` colors for the next-colors preview from the first `colors` palette entries.
    fn pick_colors(&mut self, count: u8, colors: u8) -> Vec<BallColor>;

    /// Picks `count` distinct cells from `empty`, which holds at least `count` coordinates.
    fn pick_cells(&mut self, empty: Vec<Coord2>, count: u8) -> Vec<Coord2>;
}
