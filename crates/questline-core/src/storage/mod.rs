//! Local persistence: the versioned JSON snapshot and the TOML config.

mod config;
mod snapshot;

pub use config::{Config, GardenConfig, GatewayConfig};
pub use snapshot::{SnapshotStore, SNAPSHOT_KEY};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `~/.config/questline[-dev]/` based on QUESTLINE_ENV.
///
/// Set QUESTLINE_ENV=dev to use the development data directory.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("QUESTLINE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("questline-dev")
    } else {
        base_dir.join("questline")
    };

    std::fs::create_dir_all(&dir).map_err(|e| StorageError::DataDir {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
