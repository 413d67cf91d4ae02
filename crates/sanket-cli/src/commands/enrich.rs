//! Enrich and preview commands

use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::info;

use sanket_core::{
    export::export,
    render::render_page,
    ExportFormat, Session,
};

/// Resolve the export format from an explicit flag or the output extension.
fn resolve_format(format: Option<&str>, output: &Path) -> Result<ExportFormat> {
    if let Some(name) = format {
        return name
            .parse::<ExportFormat>()
            .map_err(|e| anyhow::anyhow!(e));
    }
    match output.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => Ok(ExportFormat::Csv),
        Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(ExportFormat::Json),
        _ => bail!(
            "Cannot infer format from '{}'; pass --format csv|json",
            output.display()
        ),
    }
}

/// Load the reference data, enrich one spreadsheet, and return the session
/// with its merged rows.
fn enrich_session(reference_dir: &Path, input: &Path) -> Result<Session> {
    let mut session = Session::load_dir(reference_dir);
    let bytes = std::fs::read(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let count = session
        .upload_workbook(&bytes)
        .with_context(|| format!("Failed to parse {}", input.display()))?;
    info!("Loaded {} rows from {}", count, input.display());
    session.merge()?;
    Ok(session)
}

pub fn cmd_enrich(
    reference_dir: &Path,
    input: &Path,
    output: &Path,
    format: Option<&str>,
    preview: Option<&Path>,
) -> Result<()> {
    let format = resolve_format(format, output)?;
    let session = enrich_session(reference_dir, input)?;

    let payload = export(session.merged(), format)?;
    std::fs::write(output, payload)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!(
        "Wrote {} merged rows to {}",
        session.merged().len(),
        output.display()
    );

    if let Some(path) = preview {
        std::fs::write(path, render_page(session.merged()))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Wrote HTML preview to {}", path.display());
    }

    Ok(())
}

pub fn cmd_preview(reference_dir: &Path, input: &Path, output: &Path) -> Result<()> {
    let session = enrich_session(reference_dir, input)?;
    std::fs::write(output, render_page(session.merged()))
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!(
        "Wrote HTML preview of {} rows to {}",
        session.merged().len(),
        output.display()
    );
    Ok(())
}
