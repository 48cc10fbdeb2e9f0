//! Player progress: the highest unlocked level
//!
//! The puzzle core never touches storage; sessions talk to a [`ProgressStore`].
//! [`JsonProgress`] keeps the value in a small JSON file, [`MemoryProgress`]
//! is for tests and throwaway runs.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::consts::{FIRST_LEVEL, PROGRESS_FILE};
use crate::error::Result;

/// Where the highest unlocked level is kept
pub trait ProgressStore {
    /// Highest unlocked level, at least 1
    fn max_level(&self) -> u32;

    /// Raise the stored level to `candidate` if it is higher.
    ///
    /// Returns whether the stored value changed.
    fn update_max_level_if_higher(&mut self, candidate: u32) -> Result<bool>;
}

fn first_level() -> u32 {
    FIRST_LEVEL
}

/// Persisted progress record.
///
/// The file is shared with other settings; keys this crate does not know are
/// kept in `extra` and written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    #[serde(default = "first_level")]
    pub max_level: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            max_level: FIRST_LEVEL,
            extra: Map::new(),
        }
    }
}

impl Progress {
    /// Store a level, flooring at the first level
    pub fn set_max_level(&mut self, level: u32) {
        self.max_level = level.max(FIRST_LEVEL);
    }

    /// Returns true if the value was raised
    fn raise_to(&mut self, candidate: u32) -> bool {
        if candidate > self.max_level {
            self.set_max_level(candidate);
            true
        } else {
            false
        }
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryProgress {
    progress: Progress,
}

impl MemoryProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_level(level: u32) -> Self {
        let mut progress = Progress::default();
        progress.set_max_level(level);
        Self { progress }
    }
}

impl ProgressStore for MemoryProgress {
    fn max_level(&self) -> u32 {
        self.progress.max_level
    }

    fn update_max_level_if_higher(&mut self, candidate: u32) -> Result<bool> {
        Ok(self.progress.raise_to(candidate))
    }
}

/// JSON-file store, written through on every change
#[derive(Debug, Clone)]
pub struct JsonProgress {
    /// Absolute path to the progress file
    path: PathBuf,
    progress: Progress,
}

impl JsonProgress {
    /// Open the progress file inside `data_dir`.
    ///
    /// A missing file starts from level 1. An unreadable or corrupt file is
    /// logged and also starts from level 1; it is overwritten on the next save.
    pub fn open(data_dir: impl AsRef<Path>) -> Self {
        let path = data_dir.as_ref().join(PROGRESS_FILE);
        debug!("Progress file: {path:?}");

        let progress = match Self::read(&path) {
            Ok(Some(progress)) => {
                info!("Loaded progress (max level {})", progress.max_level);
                progress
            }
            Ok(None) => {
                info!("No progress file found, starting fresh");
                Progress::default()
            }
            Err(e) => {
                warn!("Ignoring unreadable progress file {path:?}: {e}");
                Progress::default()
            }
        };

        Self { path, progress }
    }

    /// Read a progress file, `None` if it does not exist
    pub fn read(path: &Path) -> Result<Option<Progress>> {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut progress: Progress = serde_json::from_reader(BufReader::new(file))?;
        progress.set_max_level(progress.max_level);
        Ok(Some(progress))
    }

    /// Write the current progress, creating the data directory if needed
    pub fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer(&mut writer, &self.progress)?;
        writer.flush()?;
        info!("Progress saved (max level {})", self.progress.max_level);
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for JsonProgress {
    fn max_level(&self) -> u32 {
        self.progress.max_level
    }

    fn update_max_level_if_higher(&mut self, candidate: u32) -> Result<bool> {
        if !self.progress.raise_to(candidate) {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }
}
