//! JSON report output.

use anyhow::{Context, Result};

use labgrade_core::GradeReport;

/// Pretty-printed JSON for programmatic consumers.
pub fn generate_json(report: &GradeReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize report")
}
