//! Level generation
//!
//! Levels are the same for everyone: the level number seeds a `Pcg32`, and
//! the solved layout is built by constraint propagation over an unset board.
//! Each step picks a random unset cell and decides its four sides:
//! - off the board: closed
//! - already-set neighbour: copy its side facing this cell
//! - unset neighbour: fair coin flip
//!
//! Adjacent set cells therefore always agree, and the finished board is solved.

use log::debug;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::mask::{Mask, Side};
use super::scramble::{Scramble, scramble};
use super::sizing::board_size;
use crate::consts::{FIRST_LEVEL, SEED_MULTIPLIER};
use crate::error::{LoopError, Result};

/// A generated level, ready to play
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub number: u32,
    /// Solved layout before scrambling
    pub solution: Grid,
    /// Board handed to the player
    pub puzzle: Grid,
    /// Rotations that turned `solution` into `puzzle`
    pub scramble: Scramble,
}

/// Generation seed for a level
pub fn level_seed(level: u32) -> u64 {
    u64::from(level).wrapping_mul(SEED_MULTIPLIER)
}

fn check_level(level: u32) -> Result<()> {
    if level < FIRST_LEVEL {
        return Err(LoopError::InvalidLevel(level));
    }
    Ok(())
}

/// Fill a `width x height` board with a solved pipe layout
pub fn fill_connected<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Grid {
    let geometry = Grid::new(width, height);
    let mut cells: Vec<Option<Mask>> = vec![None; width * height];
    let mut unset: Vec<usize> = (0..cells.len()).collect();

    while !unset.is_empty() {
        let i = unset.swap_remove(rng.random_range(0..unset.len()));
        let (x, y) = (i % width, i / width);

        let mut open = [false; 4];
        for (slot, side) in open.iter_mut().zip(Side::ALL) {
            *slot = match geometry.neighbor(x, y, side) {
                None => false,
                Some((nx, ny)) => match cells[ny * width + nx] {
                    Some(neighbor) => neighbor.has_connection(side.opposite()),
                    None => rng.random_bool(0.5),
                },
            };
        }
        let [left, up, right, down] = open;
        cells[i] = Some(Mask::from_sides(left, up, right, down));
    }

    Grid::from_cells(width, height, cells.into_iter().flatten().collect())
}

/// Solved layout of a level. Identical on every call for the same level.
pub fn generate_presolved(level: u32) -> Result<Grid> {
    check_level(level)?;
    let mut rng = Pcg32::seed_from_u64(level_seed(level));
    Ok(presolved_from(level, &mut rng))
}

fn presolved_from(level: u32, rng: &mut Pcg32) -> Grid {
    let (width, height) = board_size(level);
    let grid = fill_connected(width, height, rng);
    debug!(
        "Level {}: {}x{} board, {} rotatable tiles",
        level,
        width,
        height,
        grid.eligible_count()
    );
    grid
}

/// Generate and scramble a level.
///
/// The scramble draws from the same seeded stream as the layout, so the
/// whole level (puzzle included) is reproducible from its number.
pub fn generate(level: u32) -> Result<Level> {
    check_level(level)?;
    let mut rng = Pcg32::seed_from_u64(level_seed(level));
    let solution = presolved_from(level, &mut rng);
    Ok(scramble_level(level, solution, &mut rng))
}

/// Generate a level, scrambling with a caller-provided random source.
///
/// The solved layout still comes from the level seed.
pub fn generate_with_rng<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Result<Level> {
    let solution = generate_presolved(level)?;
    Ok(scramble_level(level, solution, rng))
}

fn scramble_level<R: Rng + ?Sized>(level: u32, solution: Grid, rng: &mut R) -> Level {
    let mut puzzle = solution.clone();
    let scramble = scramble(&mut puzzle, rng);
    Level {
        number: level,
        solution,
        puzzle,
        scramble,
    }
}
