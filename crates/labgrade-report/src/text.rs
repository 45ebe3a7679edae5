//! Plain-text grade report.

use labgrade_core::improvement::TaskTrajectory;
use labgrade_core::GradeReport;

use crate::RenderOptions;

const WIDE: usize = 80;
const NARROW: usize = 40;

/// Generate the full text report.
pub fn generate_text(report: &GradeReport, options: &RenderOptions) -> String {
    if report.is_empty() {
        return "No lab results found in log file.".to_string();
    }

    let mut out = String::new();

    out.push_str(&format!("{}\n", "=".repeat(WIDE)));
    out.push_str("LAB GRADING REPORT - PASS/FAIL WITH IMPROVEMENT TRACKING\n");
    out.push_str(&format!("{}\n", "=".repeat(WIDE)));
    out.push_str(&format!(
        "Report Generated: {}\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!("Log File: {}\n", report.log_file.display()));
    out.push_str(&format!("Total Log Entries: {}\n", report.total_entries));
    if report.skipped_lines > 0 {
        out.push_str(&format!("Skipped Lines: {}\n", report.skipped_lines));
    }
    out.push('\n');

    let summary = &report.summary;
    push_heading(&mut out, "OVERALL SUMMARY", NARROW);
    out.push_str(&format!("Total Labs: {}\n", summary.total_labs));
    out.push_str(&format!("Labs Passed: {}\n", summary.labs_passed));
    out.push_str(&format!("Labs Failed: {}\n", summary.labs_failed));
    out.push_str(&format!("Overall Status: {}\n\n", report.overall_status));

    push_heading(&mut out, "LAB RESULTS", NARROW);
    for (category, lab) in &report.lab_results {
        out.push_str(&format!(
            "{} {:25}: {:4} ({}/{} tasks, {} total attempts)\n",
            lab.overall_status.symbol(),
            category,
            lab.overall_status,
            lab.passed_tasks,
            lab.total_tasks,
            lab.total_attempts
        ));
    }
    out.push('\n');

    let improvement = &report.improvement;
    push_heading(&mut out, "IMPROVEMENT ANALYSIS", NARROW);
    out.push_str(&format!(
        "First-try successes: {}\n",
        improvement.first_try_successes
    ));
    out.push_str(&format!("Retry successes: {}\n", improvement.retry_successes));
    out.push_str(&format!(
        "Tasks requiring multiple attempts: {}\n",
        improvement.tasks_with_multiple_attempts
    ));
    if improvement.improvement_shown {
        out.push_str(&format!(
            "💪 Improvement shown: {} tasks succeeded after retry!\n",
            improvement.retry_successes
        ));
    }
    out.push('\n');

    push_heading(&mut out, "DETAILED LAB ANALYSIS", WIDE);
    for (category, lab) in &report.lab_results {
        out.push('\n');
        out.push_str(&format!("{}\n", category.label().to_uppercase()));
        out.push_str(&format!("{}\n", "-".repeat(category.label().len())));
        out.push_str(&format!(
            "Status: {} ({}/{} tasks)\n",
            lab.overall_status, lab.passed_tasks, lab.total_tasks
        ));
        out.push_str(&format!(
            "Total Attempts: {} (avg: {:.1} per task)\n",
            lab.total_attempts, lab.average_attempts
        ));

        let imp = &lab.improvement;
        if imp.retry_success_count > 0 {
            out.push_str(&format!(
                "✨ Improvement: {} tasks succeeded after retry\n",
                imp.retry_success_count
            ));
        }
        if imp.first_try_success_count > 0 {
            out.push_str(&format!(
                "⚡ First-try: {} tasks passed immediately\n",
                imp.first_try_success_count
            ));
        }
        if imp.persistent_failures > 0 {
            out.push_str(&format!(
                "⚠️  Persistent: {} tasks failed despite retries\n",
                imp.persistent_failures
            ));
        }

        out.push_str("\nTask Details:\n");
        for (name, task) in &lab.tasks {
            let attempts = if task.attempts > 1 {
                format!("({} attempts)", task.attempts)
            } else {
                "(1 attempt)".to_string()
            };
            let indicator = match task.trajectory() {
                TaskTrajectory::RetrySuccess | TaskTrajectory::PersistentFailure => {
                    format!(" {}", task.trajectory().icon())
                }
                _ => String::new(),
            };
            out.push_str(&format!(
                "  {} {:30} {:4} {attempts}{indicator}\n",
                task.status.symbol(),
                name,
                task.status
            ));
        }
    }

    out.push('\n');
    push_heading(&mut out, "RECOMMENDATIONS", NARROW);
    push_recommendations(&mut out, report, options);

    out.push('\n');
    out.push_str(&"=".repeat(WIDE));
    out
}

fn push_recommendations(out: &mut String, report: &GradeReport, options: &RenderOptions) {
    let failed = report.failed_labs();
    let improved = report.improvement.improvement_shown;

    if failed.is_empty() {
        out.push_str("🎉 Excellent! All labs passed successfully!\n");
        if improved {
            out.push_str("👏 Great persistence shown - you improved through practice!\n");
        }
        return;
    }

    let names: Vec<&str> = failed.iter().map(|c| c.label()).collect();
    out.push_str(&format!(
        "📚 Focus on these failed labs: {}\n",
        names.join(", ")
    ));
    if improved {
        out.push_str("👍 You're showing good improvement - keep practicing!\n");
    }

    let persistent = report.persistent_failure_tasks();
    if !persistent.is_empty() {
        out.push_str("\nTasks needing extra attention (failed despite retries):\n");
        for (category, task) in persistent.into_iter().take(options.attention_limit) {
            out.push_str(&format!("  • {category}: {task}\n"));
        }
    }
}

fn push_heading(out: &mut String, title: &str, width: usize) {
    out.push_str(&format!("{title}\n{}\n", "-".repeat(width)));
}

/// One-line verdict, e.g. for a terminal status bar.
pub fn one_line_summary(report: &GradeReport) -> String {
    format!(
        "{} {}: {}/{} labs passed, {}/{} tasks, {} retry successes",
        report.overall_status.symbol(),
        report.overall_status,
        report.summary.labs_passed,
        report.summary.total_labs,
        report.summary.passed_tasks,
        report.summary.total_tasks,
        report.improvement.retry_successes
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{empty_report, sample_report};

    #[test]
    fn empty_log_message() {
        let text = generate_text(&empty_report(), &RenderOptions::default());
        assert_eq!(text, "No lab results found in log file.");
    }

    #[test]
    fn sections_present() {
        let text = generate_text(&sample_report(), &RenderOptions::default());
        for section in [
            "OVERALL SUMMARY",
            "LAB RESULTS",
            "IMPROVEMENT ANALYSIS",
            "DETAILED LAB ANALYSIS",
            "RECOMMENDATIONS",
        ] {
            assert!(text.contains(section), "missing {section}");
        }
        assert!(text.contains("Total Log Entries: 8"));
        assert!(text.contains("Overall Status: FAIL"));
    }

    #[test]
    fn lab_and_task_lines() {
        let text = generate_text(&sample_report(), &RenderOptions::default());
        assert!(text.contains("✓ User Management          : PASS (2/2 tasks, 3 total attempts)"));
        assert!(text.contains("✗ NFS Configuration        : FAIL (1/2 tasks, 3 total attempts)"));
        assert!(text.contains("  ✓ User Creation                  PASS (2 attempts) 📈"));
        assert!(text.contains("  ✗ NFS Mount                      FAIL (2 attempts) 🔄"));
        assert!(text.contains("  ✓ User Home Directory            PASS (1 attempt)\n"));
    }

    #[test]
    fn recommendations_list_failed_labs() {
        let text = generate_text(&sample_report(), &RenderOptions::default());
        assert!(text.contains("📚 Focus on these failed labs: NFS Configuration"));
        assert!(text.contains("  • NFS Configuration: NFS Mount"));
        assert!(text.contains("💪 Improvement shown: 1 tasks succeeded after retry!"));
    }

    #[test]
    fn attention_limit_caps_list() {
        let options = RenderOptions { attention_limit: 0 };
        let text = generate_text(&sample_report(), &options);
        assert!(text.contains("Tasks needing extra attention"));
        assert!(!text.contains("  • NFS Configuration: NFS Mount"));
    }

    #[test]
    fn one_line() {
        assert_eq!(
            one_line_summary(&sample_report()),
            "✗ FAIL: 2/3 labs passed, 4/5 tasks, 1 retry successes"
        );
    }
}
