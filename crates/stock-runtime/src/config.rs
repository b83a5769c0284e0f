//! Runtime configuration, loaded from environment variables the way the
//! deployment scripts set them.

use std::path::PathBuf;
use tracing::warn;

/// Environment variable naming the data directory.
pub const ENV_DATA_DIR: &str = "STOCK_DATA_DIR";
/// Environment variable naming the snapshot file inside the data dir.
pub const ENV_SNAPSHOT_FILE: &str = "STOCK_SNAPSHOT_FILE";
/// Environment variable sizing the per-subscriber bus buffer.
pub const ENV_BUS_CAPACITY: &str = "STOCK_BUS_CAPACITY";

/// Runtime settings with environment overrides.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Directory holding the snapshot file.
    pub data_dir: PathBuf,
    /// Snapshot file name inside `data_dir`.
    pub snapshot_file: String,
    /// Per-subscriber bus buffer size.
    pub bus_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            snapshot_file: "data.json".to_string(),
            bus_capacity: stock_bus::DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl RuntimeConfig {
    /// Defaults overridden by whatever environment variables are set.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var(ENV_DATA_DIR) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(file) = std::env::var(ENV_SNAPSHOT_FILE) {
            config.snapshot_file = file;
        }
        if let Ok(capacity) = std::env::var(ENV_BUS_CAPACITY) {
            match capacity.parse::<usize>() {
                Ok(capacity) if capacity > 0 => config.bus_capacity = capacity,
                _ => warn!(
                    value = %capacity,
                    "{ENV_BUS_CAPACITY} must be a positive integer, keeping default"
                ),
            }
        }

        config
    }

    /// Full path of the snapshot file.
    #[must_use]
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(&self.snapshot_file)
    }
}
