//! The grading pipeline.
//!
//! Reads the whole log, folds every event into an [`AttemptLedger`],
//! finalizes it, and assembles the [`GradeReport`]. Construction,
//! accumulation and finalization are separate steps; nothing is aggregated
//! until every line has been read.

use std::path::Path;

use crate::classify;
use crate::error::GradeError;
use crate::ledger::{AttemptLedger, LedgerSnapshot};
use crate::model::Event;
use crate::parser::{self, ParsedLog};
use crate::report::GradeReport;

/// Fold parsed events into a fresh ledger.
pub fn build_ledger<'a>(events: impl IntoIterator<Item = &'a Event>) -> AttemptLedger {
    events
        .into_iter()
        .fold(AttemptLedger::new(), |mut ledger, event| {
            let (category, task) = classify::classify(&event.message);
            tracing::trace!(
                line = event.line_number,
                status = %event.status,
                category = %category,
                task = %task,
                "recording event"
            );
            ledger.record(event, category, &task);
            ledger
        })
}

/// Grade an already parsed log.
pub fn grade_parsed(parsed: &ParsedLog, log_file: &Path) -> GradeReport {
    let snapshot: LedgerSnapshot = build_ledger(&parsed.events).finalize();

    let undecided = snapshot.undecided_tasks().count();
    if undecided > 0 {
        tracing::debug!(undecided, "tasks without a PASS/FAIL result are excluded");
    }

    GradeReport::assemble(&snapshot, log_file, parsed.events.len(), parsed.skipped_lines)
}

/// Grade log content held in memory.
pub fn grade_lines(content: &str, log_file: &Path) -> GradeReport {
    let parsed = parser::parse_log(content);
    tracing::info!(
        entries = parsed.events.len(),
        skipped = parsed.skipped_lines,
        "parsed {}",
        log_file.display()
    );
    grade_parsed(&parsed, log_file)
}

/// Read a log file fully into memory.
pub fn read_log(path: &Path) -> Result<String, GradeError> {
    if !path.exists() {
        return Err(GradeError::LogFileNotFound(path.to_path_buf()));
    }
    std::fs::read_to_string(path).map_err(|source| GradeError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Grade the log file at `path`.
pub fn grade_log(path: &Path) -> Result<GradeReport, GradeError> {
    let content = read_log(path)?;
    Ok(grade_lines(&content, path))
}
