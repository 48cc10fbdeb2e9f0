//! Error type shared by the puzzle core, sessions and progress stores

/// Everything that can go wrong in this crate.
///
/// The puzzle core only raises precondition errors (bad level number, corrupted
/// mask, off-grid coordinate); I/O and JSON errors come from the progress file.
#[derive(Debug, thiserror::Error)]
pub enum LoopError {
    #[error("level must be at least 1, got {0}")]
    InvalidLevel(u32),
    #[error("connectivity mask must be in 0..=15, got {0}")]
    InvalidMask(u8),
    #[error("rotation must be in 0..=3, got {0}")]
    InvalidRotation(u8),
    #[error("cell ({x}, {y}) is outside the {width}x{height} board")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    #[error("expected {expected} cells, got {actual}")]
    GridShape { expected: usize, actual: usize },
    #[error("progress file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("progress file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LoopError>;
