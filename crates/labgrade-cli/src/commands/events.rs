//! The `labgrade events` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use labgrade_core::classify::classify;
use labgrade_core::config::load_config_from;
use labgrade_core::grader::{build_ledger, read_log};
use labgrade_core::parser::parse_log;

pub fn execute(log_file: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let log_file = log_file.unwrap_or(config.log_file);

    let content = read_log(&log_file)?;
    let parsed = parse_log(&content);

    let mut table = Table::new();
    table.set_header(vec!["Line", "Status", "Lab", "Task", "Timestamp"]);

    for event in &parsed.events {
        let (category, task) = classify(&event.message);
        let timestamp = if event.timestamp_fallback {
            format!("{} (fallback)", event.timestamp.format("%Y-%m-%d %H:%M:%S"))
        } else {
            event.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
        };
        table.add_row(vec![
            Cell::new(event.line_number),
            Cell::new(event.status),
            Cell::new(category),
            Cell::new(task),
            Cell::new(timestamp),
        ]);
    }

    println!("{table}");
    println!(
        "{} entries, {} skipped line(s)",
        parsed.events.len(),
        parsed.skipped_lines
    );

    let snapshot = build_ledger(&parsed.events).finalize();
    println!(
        "{} task(s) decided, {} undecided",
        snapshot.decided_tasks().count(),
        snapshot.undecided_tasks().count()
    );

    Ok(())
}
