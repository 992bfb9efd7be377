use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Points awarded for every cleared ball.
pub const POINTS_PER_BALL: u32 = 2;

/// Extra points awarded for every ball that is part of a cross.
pub const POINTS_PER_BONUS: u32 = 8;

/// Result of a single detection-and-clear pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearReport {
    pub cleared: CellCount,
    pub bonus: CellCount,
}

impl ClearReport {
    pub const fn is_empty(&self) -> bool {
        self.cleared == 0
    }

    pub const fn points(&self) -> u32 {
        self.cleared as u32 * POINTS_PER_BALL + self.bonus as u32 * POINTS_PER_BONUS
    }
}

/// Marks every ball that belongs to a run of at least `connect` equal colors.
///
/// Runs are found as overlapping windows of exactly `connect` cells starting
/// at each ball and heading right, down, down-right or up-right, so a longer
/// run is covered by several windows. Marking is idempotent.
pub fn find_lines(board: &Array2<Cell>, connect: u8) -> Array2<bool> {
    let bounds = bounds_of(board);
    let mut marked: Array2<bool> = Array2::default(board.dim());

    for start in iter_coords(bounds) {
        let Cell::Ball(color) = board[start.to_nd_index()] else {
            continue;
        };

        for delta in LINE_DIRECTIONS {
            if is_run(board, start, delta, connect, color) {
                for i in 0..connect {
                    if let Some(coords) = step(start, delta, i, bounds) {
                        marked[coords.to_nd_index()] = true;
                    }
                }
            }
        }
    }

    marked
}

fn step(start: Coord2, (d_row, d_col): (isize, isize), i: u8, bounds: Coord2) -> Option<Coord2> {
    let i = isize::from(i);
    apply_delta(start, (d_row * i, d_col * i), bounds)
}

/// Whether the `connect` cells from `start` along `delta` all fit and hold `color`.
fn is_run(
    board: &Array2<Cell>,
    start: Coord2,
    delta: (isize, isize),
    connect: u8,
    color: BallColor,
) -> bool {
    let bounds = bounds_of(board);
    (0..connect).all(|i| {
        step(start, delta, i, bounds)
            .is_some_and(|coords| board[coords.to_nd_index()] == Cell::Ball(color))
    })
}

/// Flags every plus-shaped group of five marked cells.
///
/// Only interior cells can be the center of a cross. The center and its four
/// orthogonal neighbors are flagged; overlapping crosses share flags.
pub fn find_crosses(marked: &Array2<bool>) -> Array2<bool> {
    let (rows, cols) = bounds_of(marked);
    let mut crosses: Array2<bool> = Array2::default(marked.dim());
    if rows < 3 || cols < 3 {
        return crosses;
    }

    for row in 1..rows - 1 {
        for col in 1..cols - 1 {
            let center = (row, col);
            let arms = [
                (row - 1, col),
                (row + 1, col),
                (row, col - 1),
                (row, col + 1),
            ];
            if marked[center.to_nd_index()] && arms.iter().all(|&pos| marked[pos.to_nd_index()]) {
                crosses[center.to_nd_index()] = true;
                for pos in arms {
                    crosses[pos.to_nd_index()] = true;
                }
            }
        }
    }

    crosses
}

/// Detects lines and crosses, empties the matched cells and reports the counts.
pub fn clear_lines(board: &mut Array2<Cell>, connect: u8) -> ClearReport {
    let marked = find_lines(board, connect);
    let crosses = find_crosses(&marked);

    let mut report = ClearReport::default();
    for ((cell, &is_marked), &is_cross) in board.iter_mut().zip(marked.iter()).zip(crosses.iter()) {
        if !is_marked {
            continue;
        }
        *cell = Cell::Empty;
        report.cleared += 1;
        if is_cross {
            report.bonus += 1;
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Cell = Cell::Ball(BallColor::Red);
    const BLUE: Cell = Cell::Ball(BallColor::Blue);

    fn board_with(cells: &[(Coord2, Cell)]) -> Array2<Cell> {
        let mut board = Array2::default([9, 9]);
        for &(coords, cell) in cells {
            board[coords.to_nd_index()] = cell;
        }
        board
    }

    fn count(mask: &Array2<bool>) -> usize {
        mask.iter().filter(|&&set| set).count()
    }

    #[test]
    fn horizontal_five_clears_without_bonus() {
        let mut board = board_with(&(0..5).map(|col| ((4, col), RED)).collect::<alloc::vec::Vec<_>>());

        let report = clear_lines(&mut board, 5);

        assert_eq!(report, ClearReport { cleared: 5, bonus: 0 });
        assert_eq!(report.points(), 10);
        assert!(board.iter().all(|cell| cell.is_empty()));
    }

    #[test]
    fn four_in_a_row_is_not_a_line() {
        let board = board_with(&[((0, 0), RED), ((0, 1), RED), ((0, 2), RED), ((0, 3), RED)]);

        assert_eq!(count(&find_lines(&board, 5)), 0);
    }

    #[test]
    fn mixed_colors_break_a_run() {
        let board = board_with(&[
            ((2, 0), RED),
            ((2, 1), RED),
            ((2, 2), BLUE),
            ((2, 3), RED),
            ((2, 4), RED),
        ]);

        assert_eq!(count(&find_lines(&board, 5)), 0);
    }

    #[test]
    fn long_run_marks_each_cell_once() {
        let board = board_with(&(1..8).map(|row| ((row, 3), BLUE)).collect::<alloc::vec::Vec<_>>());

        assert_eq!(count(&find_lines(&board, 5)), 7);
    }

    #[test]
    fn both_diagonals_are_detected() {
        let mut cells: alloc::vec::Vec<_> = (0..5).map(|i| ((i, i), RED)).collect();
        cells.extend((0..5).map(|i| ((8 - i, 4 + i), BLUE)));
        let board = board_with(&cells);

        let marked = find_lines(&board, 5);

        assert_eq!(count(&marked), 10);
        assert!(marked[[8, 4]]);
        assert!(marked[[4, 8]]);
    }

    #[test]
    fn crossing_runs_award_bonus() {
        let mut cells: alloc::vec::Vec<_> = (2..7).map(|col| ((4, col), RED)).collect();
        cells.extend((2..7).filter(|&row| row != 4).map(|row| ((row, 4), RED)));
        let mut board = board_with(&cells);
        board[[0, 0]] = BLUE;

        let report = clear_lines(&mut board, 5);

        assert_eq!(report, ClearReport { cleared: 9, bonus: 5 });
        assert_eq!(report.points(), 2 * 9 + 8 * 5);
        assert_eq!(board[[0, 0]], BLUE);
    }

    #[test]
    fn bonus_is_subset_of_marked() {
        let mut cells: alloc::vec::Vec<_> = (0..9).map(|col| ((4, col), RED)).collect();
        cells.extend((0..9).map(|col| ((5, col), RED)));
        cells.extend((0..9).map(|col| ((3, col), RED)));
        let board = board_with(&cells);

        let marked = find_lines(&board, 5);
        let crosses = find_crosses(&marked);

        assert!(crosses.iter().zip(marked.iter()).all(|(&c, &m)| !c || m));
        // centers on row 4, cols 1..=7, cover the whole middle row and the rows beside it
        assert_eq!(count(&crosses), 9 + 7 + 7);
    }

    #[test]
    fn cross_center_on_border_is_ignored() {
        let mut marked: Array2<bool> = Array2::default([9, 9]);
        for pos in [(0, 4), (1, 4), (0, 3), (0, 5)] {
            marked[pos.to_nd_index()] = true;
        }

        assert_eq!(count(&find_crosses(&marked)), 0);
    }
}
