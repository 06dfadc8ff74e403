//! Init command implementation
//!
//! Creates a firm from an optional profile file and selects it.

use std::path::Path;

use mifidpru_core::profile::FirmProfile;
use tracing::info;

use super::read_json_file;
use crate::session::AppContext;
use crate::Result;

/// Run the init command
pub fn run(ctx: &mut AppContext, name: &str, profile_path: Option<&Path>) -> Result<String> {
    let profile: FirmProfile = match profile_path {
        Some(path) => read_json_file(path)?,
        None => FirmProfile::default(),
    };
    let id = ctx.create_firm(name, profile)?;
    info!(firm_id = %id, "Firm selected");
    Ok(format!("Created firm '{}' ({})", name, id))
}
