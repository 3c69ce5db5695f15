//! Versioned JSON snapshot of the whole application state.
//!
//! One document, one key. The schema version is baked into the file name:
//! a future breaking change bumps the key and old files are simply ignored
//! rather than migrated. Loading is tolerant (missing optional fields fall
//! back to defaults) but a file that fails to parse at all is reported as
//! corrupt and never overwritten implicitly.

use std::path::{Path, PathBuf};

use super::data_dir;
use crate::app::AppState;
use crate::error::StorageError;

/// Current snapshot schema key; also the file stem on disk.
pub const SNAPSHOT_KEY: &str = "questline_state_v2";

/// Handle to the snapshot document.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Store under the standard data directory.
    pub fn open_default() -> Result<Self, StorageError> {
        Ok(Self::in_dir(data_dir()?))
    }

    /// Store under an explicit directory (tests, custom setups).
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{SNAPSHOT_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Strict load: `None` when no snapshot exists yet, an error when the
    /// file exists but cannot be parsed.
    pub fn load(&self) -> Result<Option<AppState>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path).map_err(|e| StorageError::ReadFailed {
            path: self.path.clone(),
            source: e,
        })?;
        let state = serde_json::from_str(&raw).map_err(|e| StorageError::CorruptSnapshot {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        Ok(Some(state))
    }

    /// Load, falling back to a fresh state when the snapshot is missing or
    /// corrupt. The corrupt file is left in place on disk; only the next
    /// explicit save replaces it.
    pub fn load_or_default(&self) -> AppState {
        self.load().ok().flatten().unwrap_or_default()
    }

    pub fn save(&self, state: &AppState) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(state)
            .map_err(|e| StorageError::InvalidImport(e.to_string()))?;
        std::fs::write(&self.path, raw).map_err(|e| StorageError::WriteFailed {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Write the current snapshot to an external file for backup.
    pub fn export(&self, state: &AppState, dest: &Path) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(state)
            .map_err(|e| StorageError::InvalidImport(e.to_string()))?;
        std::fs::write(dest, raw).map_err(|e| StorageError::WriteFailed {
            path: dest.to_path_buf(),
            source: e,
        })
    }

    /// Validate an external document and, only if it parses as a full
    /// state, persist it as the new snapshot. A failed import leaves the
    /// existing snapshot untouched.
    pub fn import(&self, src: &Path) -> Result<AppState, StorageError> {
        let raw = std::fs::read_to_string(src).map_err(|e| StorageError::ReadFailed {
            path: src.to_path_buf(),
            source: e,
        })?;
        let state: AppState =
            serde_json::from_str(&raw).map_err(|e| StorageError::InvalidImport(e.to_string()))?;
        self.save(&state)?;
        Ok(state)
    }
}
