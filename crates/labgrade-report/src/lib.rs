//! labgrade-report — Text, JSON, and HTML renderings of a grade report.
//!
//! Renderers only read a [`GradeReport`]; every count and classification
//! they show was computed by `labgrade-core`.

pub mod html;
pub mod json;
pub mod text;

use std::path::Path;

use anyhow::{Context, Result};

use labgrade_core::config::OutputFormat;
use labgrade_core::GradeReport;

/// Presentation options shared by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Max persistent failures listed under recommendations.
    pub attention_limit: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { attention_limit: 5 }
    }
}

/// Render a report in the requested format.
pub fn render(report: &GradeReport, format: OutputFormat, options: &RenderOptions) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::generate_text(report, options)),
        OutputFormat::Json => json::generate_json(report),
        OutputFormat::Html => Ok(html::generate_html(report)),
    }
}

/// Render a report and write it to a file.
///
/// JSON goes through [`GradeReport::save_json`], so a saved JSON report is
/// exactly what `labgrade-core` persists.
pub fn write_report(
    report: &GradeReport,
    format: OutputFormat,
    options: &RenderOptions,
    path: &Path,
) -> Result<()> {
    if format == OutputFormat::Json {
        return report.save_json(path);
    }
    let rendered = render(report, format, options)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, rendered)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}
