//! Puzzle core
//!
//! Everything here is pure and deterministic:
//! - Seeded RNG only, passed in or derived from the level number
//! - No global state, so levels can be generated on any thread
//! - No rendering, audio or storage dependencies

pub mod check;
pub mod generator;
pub mod grid;
pub mod mask;
pub mod scramble;
pub mod sizing;

pub use check::{is_solved, open_ends};
pub use generator::{
    Level, fill_connected, generate, generate_presolved, generate_with_rng, level_seed,
};
pub use grid::Grid;
pub use mask::{Mask, Shape, Side, rotate_mask};
pub use scramble::{Scramble, ScrambleOutcome, scramble};
pub use sizing::board_size;
