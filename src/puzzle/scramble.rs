//! Scrambling a solved board into a puzzle
//!
//! Only orientations change: every tile keeps its shape, so the scrambled
//! board can always be rotated back into the solution.

use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::check::is_solved;
use super::grid::Grid;
use crate::consts::MAX_SCRAMBLE_PASSES;
use crate::error::{LoopError, Result};

/// How a scramble ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrambleOutcome {
    /// Board is no longer solved
    Scrambled,
    /// Nothing to rotate: every tile is empty or four-way. Board left as is.
    Degenerate,
    /// Every pass up to the cap happened to land on a solved board
    StillSolved,
}

/// Record of the rotations applied by [`scramble`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scramble {
    /// Clockwise quarter turns applied to each cell in total (row-major, 0..=3)
    pub rotations: Vec<u8>,
    /// Whole-board passes performed
    pub passes: u32,
    pub outcome: ScrambleOutcome,
}

impl Scramble {
    /// Rotate every cell back by its recorded amount.
    ///
    /// Fails without touching the board if the record is for a different size.
    pub fn undo(&self, grid: &mut Grid) -> Result<()> {
        if self.rotations.len() != grid.len() {
            return Err(LoopError::GridShape {
                expected: grid.len(),
                actual: self.rotations.len(),
            });
        }
        for (mask, &turns) in grid.masks_mut().iter_mut().zip(&self.rotations) {
            *mask = mask.rotated(-(turns as i32));
        }
        Ok(())
    }
}

/// Randomly rotate every orientation-sensitive tile until the board is not solved.
///
/// Each pass gives every eligible tile an independent uniform rotation in
/// 0..=3; a pass that lands on a solved board is followed by another full
/// pass, at most [`MAX_SCRAMBLE_PASSES`] times.
pub fn scramble<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> Scramble {
    let mut rotations = vec![0u8; grid.len()];

    let eligible = grid.eligible_count();
    if eligible == 0 {
        warn!("Board has no rotatable tiles, leaving it solved");
        return Scramble {
            rotations,
            passes: 0,
            outcome: ScrambleOutcome::Degenerate,
        };
    }

    for pass in 1..=MAX_SCRAMBLE_PASSES {
        for (mask, total) in grid.masks_mut().iter_mut().zip(rotations.iter_mut()) {
            if mask.is_rotation_invariant() {
                continue;
            }
            let turns: u8 = rng.random_range(0..4);
            *mask = mask.rotated(turns as i32);
            *total = (*total + turns) % 4;
        }

        if !is_solved(grid) {
            debug!("Scrambled {} tiles in {} pass(es)", eligible, pass);
            return Scramble {
                rotations,
                passes: pass,
                outcome: ScrambleOutcome::Scrambled,
            };
        }
    }

    warn!(
        "Board still solved after {} scramble passes",
        MAX_SCRAMBLE_PASSES
    );
    Scramble {
        rotations,
        passes: MAX_SCRAMBLE_PASSES,
        outcome: ScrambleOutcome::StillSolved,
    }
}
