use alloc::collections::VecDeque;
use ndarray::Array2;

use crate::*;

/// Returns whether a ball at `from` can travel to `to` through empty cells.
///
/// Only orthogonal steps are allowed and every intermediate cell must be
/// empty. The origin itself is never required to be empty. Path length is
/// irrelevant, only existence matters.
pub fn has_path(board: &Array2<Cell>, from: Coord2, to: Coord2) -> bool {
    let bounds = bounds_of(board);
    if from.0 >= bounds.0 || from.1 >= bounds.1 || to.0 >= bounds.0 || to.1 >= bounds.1 {
        return false;
    }

    let mut visited: Array2<bool> = Array2::default(board.dim());
    let mut to_visit = VecDeque::from([from]);
    visited[from.to_nd_index()] = true;

    while let Some(current) = to_visit.pop_front() {
        if current == to {
            return true;
        }

        for next in board.iter_neighbors(current) {
            if !visited[next.to_nd_index()] && board[next.to_nd_index()].is_empty() {
                visited[next.to_nd_index()] = true;
                to_visit.push_back(next);
            }
        }
    }

    false
}
