//! CLI command implementations
//!
//! Each submodule implements one command against an [`AppContext`]. Commands
//! return the text to print so that `main` owns stdout.
//!
//! [`AppContext`]: crate::session::AppContext

pub mod calculate;
pub mod concentration;
pub mod document;
pub mod firms;
pub mod harm;
pub mod init;
pub mod monitor;
pub mod profile;
pub mod report;
pub mod stress;
pub mod transfer;

use crate::config::OutputFormat;
use crate::{CliError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Renders `value` as pretty JSON, or as the text built by `table`.
pub(crate) fn render<T, F>(format: OutputFormat, value: &T, table: F) -> Result<String>
where
    T: Serialize + ?Sized,
    F: FnOnce() -> String,
{
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).map_err(|e| CliError::Json(e.to_string()))
        }
        OutputFormat::Table => Ok(table()),
    }
}

/// Reads and deserialises a JSON file.
pub(crate) fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| CliError::Json(format!("{}: {}", path.display(), e)))
}

/// Writes `content` under `dir`, creating the directory as needed.
pub(crate) fn write_output(dir: &Path, file_name: &str, content: &str) -> Result<std::path::PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    std::fs::write(&path, content)?;
    tracing::info!(path = %path.display(), size = content.len(), "Output written");
    Ok(path)
}

/// Left-aligned label, right-aligned value.
pub(crate) fn row(label: &str, value: impl std::fmt::Display) -> String {
    format!("  {:<40} {:>18}\n", label, value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_table_and_json() {
        let value = serde_json::json!({ "a": 1 });
        let table = render(OutputFormat::Table, &value, || "a = 1".to_string()).unwrap();
        assert_eq!(table, "a = 1");

        let json = render(OutputFormat::Json, &value, || unreachable!()).unwrap();
        assert!(json.contains("\"a\": 1"));
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_json_file::<serde_json::Value>(Path::new("/nonexistent/profile.json"))
            .unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_write_output_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested");
        let path = write_output(&out, "x.txt", "hello").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "hello");
    }
}
