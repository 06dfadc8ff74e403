//! Document command implementation
//!
//! Renders the ICARA document in Markdown for the selected firm.

use std::path::{Path, PathBuf};

use mifidpru_docs::{DocumentContext, DocumentSection, IcaraDocument};
use mifidpru_engine::run_stress_suite;
use tracing::info;

use super::write_output;
use crate::session::AppContext;
use crate::{CliError, Result};

/// Document layout options
#[derive(Debug, Clone, Default)]
pub struct DocumentOptions {
    /// Include the optional appendices section
    pub appendices: bool,
    /// Optional sections to leave out
    pub exclude: Vec<String>,
    /// Replacement text per section, as `(section id, file)` pairs
    pub custom: Vec<(String, PathBuf)>,
    /// Destination file; defaults to the output directory
    pub output: Option<PathBuf>,
}

/// Builds the document described by `options`.
pub fn build(options: &DocumentOptions) -> Result<IcaraDocument> {
    let mut document = IcaraDocument::new();
    if options.appendices {
        document.include(DocumentSection::Appendices);
    }
    for id in &options.exclude {
        let section: DocumentSection = id.parse()?;
        if !document.exclude(section) {
            return Err(CliError::invalid_argument(format!(
                "section '{}' is required and cannot be excluded",
                section.title()
            )));
        }
    }
    for (id, path) in &options.custom {
        let section: DocumentSection = id.parse()?;
        let content = read_section(path)?;
        document.set_custom_section(section, content);
    }
    Ok(document)
}

fn read_section(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Run the document command
pub fn run(ctx: &mut AppContext, options: &DocumentOptions) -> Result<PathBuf> {
    let document = build(options)?;

    let result = ctx.ensure_result();
    let profile = ctx.profile();
    let firm_name = ctx.firm()?.name.clone();
    let stress_results = run_stress_suite(&profile.stress_scenarios, &profile);

    let doc_ctx = DocumentContext::new(&profile)
        .with_firm_name(&firm_name)
        .with_result(&result)
        .with_stress_results(&stress_results);
    let content = document.render(&doc_ctx);

    let path = match &options.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &content)?;
            path.clone()
        }
        None => write_output(
            &ctx.config().output_dir,
            &document.file_name(Some(&firm_name)),
            &content,
        )?,
    };
    info!(sections = document.sections().len(), path = %path.display(), "ICARA document written");
    Ok(path)
}

/// The document sections.
pub fn list_sections() -> String {
    DocumentSection::all()
        .iter()
        .map(|s| {
            format!(
                "{:<22} {}{}\n",
                s.id(),
                s.title(),
                if s.required() { "" } else { " (optional)" }
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::testing::acme;

    #[test]
    fn test_document_written() {
        let (_dir, mut ctx) = acme();
        ctx.record_scenario(mifidpru_engine::StressPreset::MarketDownturn.scenario())
            .unwrap();

        let path = run(
            &mut ctx,
            &DocumentOptions {
                appendices: true,
                ..DocumentOptions::default()
            },
        )
        .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("ICARA_Acme_"));
        assert!(content.contains("**Firm Name**: Acme"));
        assert!(content.contains("Market Downturn"));
        assert!(content.contains("Appendices"));
    }

    #[test]
    fn test_custom_section_from_file() {
        let (dir, mut ctx) = acme();
        let custom = dir.path().join("summary.md");
        std::fs::write(&custom, "Board-approved summary.").unwrap();

        let options = DocumentOptions {
            custom: vec![("executive_summary".to_string(), custom)],
            output: Some(dir.path().join("icara.md")),
            ..DocumentOptions::default()
        };
        let path = run(&mut ctx, &options).unwrap();
        assert!(std::fs::read_to_string(path)
            .unwrap()
            .contains("Board-approved summary."));
    }

    #[test]
    fn test_required_section_cannot_be_excluded() {
        let options = DocumentOptions {
            exclude: vec!["executive_summary".to_string()],
            ..DocumentOptions::default()
        };
        assert!(matches!(build(&options), Err(CliError::InvalidArgument(_))));
    }

    #[test]
    fn test_list_sections() {
        let listing = list_sections();
        assert_eq!(listing.lines().count(), 11);
        assert!(listing.contains("(optional)"));
    }
}
