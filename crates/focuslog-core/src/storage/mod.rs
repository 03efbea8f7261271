mod config;
mod memory;
mod persistence;
mod sqlite;

pub use config::{Config, LoggingConfig, StorageConfig};
pub use memory::MemoryStore;
pub use persistence::{Persistence, OWNER_KEY, OWNER_PREFIX};
pub use sqlite::SqliteStore;

use std::path::PathBuf;

use crate::error::StorageError;

/// Namespaced string key-value store holding small JSON blobs.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Returns the data directory, creating it if needed.
///
/// `FOCUSLOG_DATA_DIR` overrides the location. Otherwise
/// `~/.config/focuslog[-dev]/`, with `FOCUSLOG_ENV=dev` selecting the
/// development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("FOCUSLOG_DATA_DIR") {
        Some(custom) => PathBuf::from(custom),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("FOCUSLOG_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("focuslog-dev")
            } else {
                base_dir.join("focuslog")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
