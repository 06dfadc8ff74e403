//! JSON file backend for the firm store.

use crate::error::StoreError;
use crate::store::FirmStore;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Reads and writes a [`FirmStore`] as a single JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a backend for the given file path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the store, or an empty store if the file does not exist yet.
    pub fn load(&self) -> Result<FirmStore, StoreError> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "Store file absent, starting empty");
            return Ok(FirmStore::new());
        }
        let content = fs::read_to_string(&self.path)?;
        let store: FirmStore = serde_json::from_str(&content).map_err(StoreError::from_parse)?;
        info!(
            path = %self.path.display(),
            firms = store.len(),
            "Store loaded"
        );
        Ok(store)
    }

    /// Writes the store, creating parent directories as needed.
    ///
    /// The document is written to a sibling temporary file and renamed over
    /// the target so a failed write never truncates the previous state.
    pub fn save(&self, store: &FirmStore) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(store)
            .map_err(|e| StoreError::Serialisation(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &content)?;
        fs::rename(&tmp, &self.path)?;

        info!(
            path = %self.path.display(),
            firms = store.len(),
            size = content.len(),
            "Store written to file"
        );
        Ok(())
    }
}

/// Writes a single exported firm to `path`.
pub fn write_export(path: impl AsRef<Path>, json: &str) -> Result<(), StoreError> {
    let path = path.as_ref();
    fs::write(path, json)?;
    info!(path = %path.display(), size = json.len(), "Firm export written to file");
    Ok(())
}

/// Reads an exported firm from `path`.
pub fn read_export(path: impl AsRef<Path>) -> Result<String, StoreError> {
    Ok(fs::read_to_string(path)?)
}
