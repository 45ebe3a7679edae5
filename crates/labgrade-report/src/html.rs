//! HTML report generator.
//!
//! Produces a self-contained HTML page with all CSS inlined.

use labgrade_core::improvement::TaskTrajectory;
use labgrade_core::model::Verdict;
use labgrade_core::GradeReport;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn status_class(status: Verdict) -> &'static str {
    match status {
        Verdict::Pass => "pass",
        Verdict::Fail => "fail",
    }
}

/// Generate an HTML report from a grade report.
pub fn generate_html(report: &GradeReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>Lab Grading Report - Pass/Fail with Improvement Tracking</title>\n");
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<div class=\"header\">\n");
    html.push_str("<h1>Lab Grading Report - Pass/Fail with Improvement Tracking</h1>\n");
    html.push_str(&format!(
        "<p>Generated: {}</p>\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str(&format!(
        "<p>Log File: {}</p>\n",
        html_escape(&report.log_file.display().to_string())
    ));
    html.push_str("</div>\n");

    // Summary cards
    let overall = status_class(report.overall_status);
    html.push_str("<div class=\"summary-cards\">\n");
    html.push_str(&format!(
        "<div class=\"card {overall}-card\">\n<h3>Overall Status</h3>\n<h2 class=\"{overall}\">{}</h2>\n<p>{}/{} Labs Passed</p>\n</div>\n",
        report.overall_status, report.summary.labs_passed, report.summary.total_labs
    ));
    html.push_str(&format!(
        "<div class=\"card\">\n<h3>Total Attempts</h3>\n<h2>{}</h2>\n<p>Across all tasks</p>\n</div>\n",
        report.summary.total_attempts
    ));
    html.push_str(&format!(
        "<div class=\"card improvement-card\">\n<h3>Improvement Shown</h3>\n<h2>{}</h2>\n<p>Tasks succeeded after retry</p>\n</div>\n",
        report.improvement.retry_successes
    ));
    html.push_str("</div>\n");

    if report.lab_results.is_empty() {
        html.push_str("<p class=\"empty\">No lab results found in log file.</p>\n");
    }

    // Lab summary table
    html.push_str("<div class=\"lab-section\">\n<h2>Lab Results Summary</h2>\n");
    html.push_str("<table class=\"task-table\">\n");
    html.push_str("<tr><th>Lab Type</th><th>Status</th><th>Tasks</th><th>Attempts</th><th>Improvement</th></tr>\n");
    for (category, lab) in &report.lab_results {
        let icon = if lab.improvement.retry_success_count > 0 {
            TaskTrajectory::RetrySuccess.icon()
        } else {
            ""
        };
        html.push_str(&format!(
            "<tr><td>{}</td><td class=\"{}\">{}</td><td>{}/{}</td><td>{} (avg: {:.1})</td><td>{} {} retries succeeded</td></tr>\n",
            html_escape(category.label()),
            status_class(lab.overall_status),
            lab.overall_status,
            lab.passed_tasks,
            lab.total_tasks,
            lab.total_attempts,
            lab.average_attempts,
            icon,
            lab.improvement.retry_success_count
        ));
    }
    html.push_str("</table>\n</div>\n");

    // Per-lab task breakdown
    for (category, lab) in &report.lab_results {
        html.push_str(&format!(
            "<div class=\"lab-header\">\n<h3>{} - {} {}</h3>\n</div>\n",
            html_escape(category.label()),
            lab.overall_status.symbol(),
            lab.overall_status
        ));
        html.push_str("<table class=\"task-table\">\n");
        html.push_str("<tr><th>Task</th><th>Status</th><th>Attempts</th><th>Last Attempt</th><th>Progress</th></tr>\n");
        for (name, task) in &lab.tasks {
            let icon = task.trajectory().icon();
            let progress = if icon.is_empty() {
                String::new()
            } else {
                format!("<span class=\"improvement-icon\">{icon}</span>")
            };
            html.push_str(&format!(
                "<tr><td>{}</td><td class=\"{}\">{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                html_escape(name),
                status_class(task.status),
                task.status,
                task.attempts,
                task.timestamp.format("%Y-%m-%d %H:%M:%S"),
                progress
            ));
        }
        html.push_str("</table>\n");
    }

    html.push_str("</body>\n</html>");
    html
}

const CSS: &str = r#"
body { font-family: Arial, sans-serif; margin: 40px; }
.header { background: #2c3e50; color: white; padding: 20px; border-radius: 5px; }
.summary-cards { display: flex; gap: 20px; margin: 20px 0; }
.card { background: #ecf0f1; padding: 15px; border-radius: 5px; flex: 1; text-align: center; }
.pass-card { background: #d5f4e6; }
.fail-card { background: #fdeaea; }
.improvement-card { background: #fff3cd; }
.lab-section { margin: 20px 0; }
.pass { color: #27ae60; font-weight: bold; }
.fail { color: #e74c3c; font-weight: bold; }
.empty { color: #6b7280; font-style: italic; }
.task-table { width: 100%; border-collapse: collapse; margin: 10px 0; }
.task-table th, .task-table td { border: 1px solid #ddd; padding: 8px; text-align: left; }
.task-table th { background-color: #f2f2f2; }
.improvement-icon { font-size: 1.2em; }
.lab-header { background: #34495e; color: white; padding: 10px; margin: 15px 0 5px 0; }
"#;
