//! High-score record kept between runs.
//!
//! The record is read once when a session starts and written at checkpoints
//! (game over, quit, victory). A missing file is an empty record, not an error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::player::PlayerProgress;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("save file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("save file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Snapshot of the best run so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub level: u32,
    pub chips: u32,
    pub hands_won: u32,
    /// Percentage of hands won
    pub win_rate: f64,
    /// RFC3339 time the run was recorded
    pub timestamp: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    #[serde(default)]
    pub high_score: u32,
    #[serde(default)]
    pub best_run_stats: Option<RunStats>,
}

impl SaveData {
    /// Folds a run into the record. The high score never decreases and the
    /// best-run snapshot is replaced only by a run that beats it.
    /// Returns `true` when the run set a new high score.
    pub fn record_run(&mut self, progress: &PlayerProgress, timestamp: String) -> bool {
        let improved = progress.level > self.high_score;
        if improved || self.best_run_stats.is_none() {
            self.best_run_stats = Some(RunStats {
                level: progress.level,
                chips: progress.chips,
                hands_won: progress.stats.hands_won,
                win_rate: progress.stats.win_rate(),
                timestamp,
            });
        }
        self.high_score = self.high_score.max(progress.level);
        improved
    }
}

/// Where the record lives.
pub trait SaveStore {
    fn load(&self) -> Result<SaveData, PersistError>;
    fn save(&self, data: &SaveData) -> Result<(), PersistError>;
}

/// JSON file on disk. Last writer wins.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SaveStore for JsonFileStore {
    fn load(&self) -> Result<SaveData, PersistError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(SaveData::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, data: &SaveData) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
