//! Indefinite Loop - A tile-rotation pipe puzzle
//!
//! Core modules:
//! - `puzzle`: Deterministic level generation, scrambling and the solved check
//! - `session`: One level in play (rotate a tile, detect the win, advance)
//! - `progress`: Highest unlocked level, in memory or as a JSON file

pub mod error;
pub mod progress;
pub mod puzzle;
pub mod session;

pub use error::{LoopError, Result};
pub use progress::{JsonProgress, MemoryProgress, ProgressStore};
pub use puzzle::{Grid, Level, Mask, Shape, Side, board_size, generate, is_solved, rotate_mask};
pub use session::{MoveOutcome, Session, Turn};

/// Game configuration constants
pub mod consts {
    /// Level number is multiplied by this to get the generation seed,
    /// keeping neighbouring levels' seeds far apart
    pub const SEED_MULTIPLIER: u64 = 69420;

    /// Upper bound on whole-board scramble passes before giving up
    pub const MAX_SCRAMBLE_PASSES: u32 = 64;

    /// Board side length by level: `(first level NOT in this tier, side)`
    pub const SIZE_TIERS: [(u32, usize); 3] = [(5, 5), (70, 10), (150, 25)];
    /// Board side for every level past the last tier
    pub const MAX_SIDE: usize = 50;

    /// Progress file name inside the data directory
    pub const PROGRESS_FILE: &str = "game_data.json";
    /// First level, and the floor for stored progress
    pub const FIRST_LEVEL: u32 = 1;
}
