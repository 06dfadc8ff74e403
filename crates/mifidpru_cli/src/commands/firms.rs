//! Firms command implementation
//!
//! Lists, selects, renames and deletes firms in the store.

use mifidpru_core::types::FirmId;
use serde::Serialize;

use super::render;
use crate::session::AppContext;
use crate::Result;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FirmListing<'a> {
    id: &'a FirmId,
    name: &'a str,
    modified_date: String,
    calculations: usize,
    current: bool,
}

/// List every firm
pub fn list(ctx: &AppContext) -> Result<String> {
    let current = ctx.store().current().map(|f| &f.id);
    let listings: Vec<FirmListing<'_>> = ctx
        .store()
        .firms()
        .iter()
        .map(|f| FirmListing {
            id: &f.id,
            name: &f.name,
            modified_date: f.modified_date.format("%Y-%m-%d %H:%M").to_string(),
            calculations: f.calculations.len(),
            current: current == Some(&f.id),
        })
        .collect();

    render(ctx.config().output_format, &listings, || {
        if listings.is_empty() {
            return "No firms. Run `mifidpru init <name>` to create one.".to_string();
        }
        let mut out = format!("{:<2}{:<38} {:<30} {:>5}  {}\n", "", "ID", "Name", "Calcs", "Modified");
        for l in &listings {
            out.push_str(&format!(
                "{:<2}{:<38} {:<30} {:>5}  {}\n",
                if l.current { "*" } else { "" },
                l.id.as_str(),
                l.name,
                l.calculations,
                l.modified_date
            ));
        }
        out
    })
}

/// Select the current firm
pub fn select(ctx: &mut AppContext, id: &str) -> Result<String> {
    let id = FirmId::new(id);
    ctx.select_firm(&id)?;
    Ok(format!("Selected firm '{}'", ctx.firm()?.name))
}

/// Rename the current firm
pub fn rename(ctx: &mut AppContext, name: &str) -> Result<String> {
    ctx.rename_firm(name)?;
    Ok(format!("Renamed firm to '{}'", name))
}

/// Delete a firm
pub fn delete(ctx: &mut AppContext, id: &str) -> Result<String> {
    let removed = ctx.delete_firm(&FirmId::new(id))?;
    Ok(format!("Deleted firm '{}'", removed.name))
}
