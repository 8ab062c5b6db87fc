//! JSON file-backed settings store

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::ScoreStore;
use crate::error::StoreError;

/// Settings persisted as a flat JSON object of integers.
///
/// Writes go to a temporary file that is renamed over the original.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, i64>,
}

impl JsonFileStore {
    /// Open a store; a missing file starts empty
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(json) => {
                let values: BTreeMap<String, i64> = serde_json::from_str(&json)?;
                log::info!("Loaded {} settings from {}", values.len(), path.display());
                values
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, starting fresh", path.display());
                BTreeMap::new()
            }
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write all values to disk
    pub fn flush(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.values)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl ScoreStore for JsonFileStore {
    fn get_integer(&self, key: &str) -> i64 {
        self.values.get(key).copied().unwrap_or(0)
    }

    fn set_integer(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), value);
        match self.flush() {
            Ok(()) => log::info!("Saved {key}={value}"),
            Err(err) => log::warn!("Could not save {key}: {err}"),
        }
    }
}
