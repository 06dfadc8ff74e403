//! Export and import command implementations
//!
//! Moves a single firm, with its saved calculations, in and out of the
//! store as a JSON file.

use std::path::{Path, PathBuf};

use mifidpru_store::{read_export, write_export};

use super::profile::describe_corrections;
use crate::session::AppContext;
use crate::Result;

/// Export the selected firm
///
/// Without `output` the file lands in the output directory as
/// `<firm id>.json`.
pub fn export(ctx: &AppContext, output: Option<&Path>) -> Result<PathBuf> {
    let json = ctx.export_firm()?;
    let path = match output {
        Some(path) => path.to_path_buf(),
        None => ctx
            .config()
            .output_dir
            .join(format!("{}.json", ctx.firm()?.id)),
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    write_export(&path, &json)?;
    Ok(path)
}

/// Import a firm from an export file
pub fn import(ctx: &mut AppContext, path: &Path) -> Result<String> {
    let json = read_export(path)?;
    let outcome = ctx.import_firm(&json)?;
    let headline = format!(
        "{} firm {}",
        if outcome.replaced { "Replaced" } else { "Imported" },
        outcome.firm_id
    );
    Ok(describe_corrections(&headline, &outcome.corrections))
}
