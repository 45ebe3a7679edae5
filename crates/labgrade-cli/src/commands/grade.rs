//! The `labgrade grade` command.

use std::path::PathBuf;

use anyhow::Result;

use labgrade_core::config::{load_config_from, OutputFormat};
use labgrade_core::grade_log;
use labgrade_report::text::one_line_summary;
use labgrade_report::{render, write_report, RenderOptions};

pub fn execute(
    log_file: Option<PathBuf>,
    format: Option<String>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let log_file = log_file.unwrap_or(config.log_file);
    let format: OutputFormat = match format {
        Some(f) => f.parse().map_err(|e: String| anyhow::anyhow!(e))?,
        None => config.output_format,
    };
    let options = RenderOptions {
        attention_limit: config.attention_limit,
    };

    tracing::debug!(log_file = %log_file.display(), %format, "grading");
    let report = grade_log(&log_file)?;

    match output {
        Some(path) => {
            write_report(&report, format, &options, &path)?;
            println!("Report saved to {}", path.display());
            eprintln!("{}", one_line_summary(&report));
        }
        None => {
            println!("{}", render(&report, format, &options)?);
        }
    }

    Ok(())
}
