//! Solved-state check
//!
//! A board is solved when no pipe leads nowhere: every open side of every tile
//! faces an open side of its neighbour, and nothing points off the board.

use super::grid::Grid;
use super::mask::{Mask, Side};

/// True if the open side of the tile at `(x, y)` is matched
fn side_is_closed(grid: &Grid, x: usize, y: usize, side: Side) -> bool {
    grid.neighbor(x, y, side)
        .and_then(|(nx, ny)| grid.get(nx, ny))
        .is_some_and(|n| n.has_connection(side.opposite()))
}

fn open_sides(mask: Mask) -> impl Iterator<Item = Side> {
    Side::ALL.into_iter().filter(move |&s| mask.has_connection(s))
}

/// Check the whole board. A board with no tiles is trivially solved.
pub fn is_solved(grid: &Grid) -> bool {
    grid.cells()
        .filter(|(_, mask)| !mask.is_empty())
        .all(|((x, y), mask)| open_sides(mask).all(|side| side_is_closed(grid, x, y, side)))
}

/// Count open sides without a matching partner (0 iff solved).
///
/// A mismatched pair between two tiles counts once per offending side.
pub fn open_ends(grid: &Grid) -> usize {
    grid.cells()
        .map(|((x, y), mask)| {
            open_sides(mask)
                .filter(|&side| !side_is_closed(grid, x, y, side))
                .count()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_is_solved() {
        assert!(is_solved(&Grid::new(5, 5)));
        assert!(is_solved(&Grid::new(0, 0)));
        assert_eq!(open_ends(&Grid::new(3, 3)), 0);
    }

    #[test]
    fn test_closed_loop_is_solved() {
        let grid = Grid::from_raw(2, 2, &[12, 9, 6, 3]).unwrap();
        assert!(is_solved(&grid));
        assert_eq!(open_ends(&grid), 0);
    }

    #[test]
    fn test_pointing_off_board_fails() {
        // A single "one" tile pointing right on a 1x1 board
        let grid = Grid::from_raw(1, 1, &[4]).unwrap();
        assert!(!is_solved(&grid));
        assert_eq!(open_ends(&grid), 1);
    }

    #[test]
    fn test_missing_reciprocal_fails() {
        // Left tile opens right, right tile opens up (off board) instead of left
        let grid = Grid::from_raw(2, 1, &[4, 2]).unwrap();
        assert!(!is_solved(&grid));
        assert_eq!(open_ends(&grid), 2);

        let fixed = Grid::from_raw(2, 1, &[4, 1]).unwrap();
        assert!(is_solved(&fixed));
    }

    #[test]
    fn test_vertical_pair() {
        let grid = Grid::from_raw(1, 2, &[8, 2]).unwrap();
        assert!(is_solved(&grid));
        let flipped = Grid::from_raw(1, 2, &[2, 8]).unwrap();
        assert!(!is_solved(&flipped));
    }
}
