use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Uniformly random colors and placements from a seeded generator.
///
/// Placement shuffles the empty cells and takes a prefix, so it never retries
/// and a fixed seed always reproduces the same game.
#[derive(Clone, Debug)]
pub struct RandomBallGenerator {
    rng: SmallRng,
}

impl RandomBallGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl BallGenerator for RandomBallGenerator {
    fn pick_colors(&mut self, count: u8, colors: u8) -> Vec<BallColor> {
        let colors = colors.clamp(1, BallColor::ALL.len() as u8);
        (0..count)
            .map(|_| BallColor::ALL[self.rng.random_range(0..usize::from(colors))])
            .collect()
    }

    fn pick_cells(&mut self, mut empty: Vec<Coord2>, count: u8) -> Vec<Coord2> {
        let count = usize::from(count);
        if empty.len() < count {
            log::warn!(
                "Not enough empty cells, requested {} but only {} left",
                count,
                empty.len()
            );
        }
        empty.shuffle(&mut self.rng);
        empty.truncate(count);
        empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_reproduces_choices() {
        let empty: Vec<Coord2> = iter_coords((9, 9)).collect();
        let mut a = RandomBallGenerator::new(7);
        let mut b = RandomBallGenerator::new(7);

        assert_eq!(a.pick_colors(3, 7), b.pick_colors(3, 7));
        assert_eq!(a.pick_cells(empty.clone(), 3), b.pick_cells(empty, 3));
    }

    #[test]
    fn colors_stay_within_palette_prefix() {
        let mut generator = RandomBallGenerator::new(1);

        let colors = generator.pick_colors(100, 2);

        assert_eq!(colors.len(), 100);
        assert!(colors.iter().all(|color| color.index() < 2));
    }

    #[test]
    fn picked_cells_are_distinct_members_of_empty() {
        let empty = alloc::vec![(0, 0), (0, 1), (1, 0), (5, 5)];
        let mut generator = RandomBallGenerator::new(3);

        let mut cells = generator.pick_cells(empty.clone(), 3);

        assert_eq!(cells.len(), 3);
        assert!(cells.iter().all(|pos| empty.contains(pos)));
        cells.sort();
        cells.dedup();
        assert_eq!(cells.len(), 3);
    }
}
