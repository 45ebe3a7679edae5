//! Grade report types with JSON persistence.
//!
//! [`GradeReport`] is built once from a finalized ledger and is read-only
//! afterwards; renderers consume it without re-deriving any classification.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::improvement::{ImprovementMetrics, TaskTrajectory};
use crate::ledger::LedgerSnapshot;
use crate::model::{LabCategory, TaskOutcome, Verdict};

/// Pass/fail rollup of one lab category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabResult {
    pub overall_status: Verdict,
    pub passed_tasks: u32,
    pub total_tasks: u32,
    /// Percentage of passed tasks, 0 when there are no tasks.
    pub pass_rate: f64,
    pub total_attempts: u32,
    pub average_attempts: f64,
    pub improvement: ImprovementMetrics,
    /// Finalized tasks of this lab, by task name.
    pub tasks: BTreeMap<String, TaskOutcome>,
}

impl LabResult {
    pub fn from_tasks(tasks: BTreeMap<String, TaskOutcome>) -> Self {
        let total_tasks = tasks.len() as u32;
        let passed_tasks = tasks.values().filter(|t| t.status.is_pass()).count() as u32;
        let total_attempts: u32 = tasks.values().map(|t| t.attempts).sum();
        let improvement = ImprovementMetrics::from_tasks(tasks.values());

        let (pass_rate, average_attempts) = if total_tasks > 0 {
            (
                passed_tasks as f64 / total_tasks as f64 * 100.0,
                total_attempts as f64 / total_tasks as f64,
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            overall_status: if passed_tasks == total_tasks {
                Verdict::Pass
            } else {
                Verdict::Fail
            },
            passed_tasks,
            total_tasks,
            pass_rate,
            total_attempts,
            average_attempts,
            improvement,
            tasks,
        }
    }
}

/// Lab and task totals across every category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeSummary {
    pub total_labs: u32,
    pub labs_passed: u32,
    pub labs_failed: u32,
    pub passed_tasks: u32,
    pub total_tasks: u32,
    pub total_attempts: u32,
}

/// Improvement counters across every category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImprovementTotals {
    pub first_try_successes: u32,
    pub retry_successes: u32,
    pub persistent_failures: u32,
    pub tasks_with_multiple_attempts: u32,
    /// At least one task passed after a retry.
    pub improvement_shown: bool,
}

/// A complete grade report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeReport {
    /// When the report was created.
    pub generated_at: DateTime<Utc>,
    /// The log file that was graded.
    pub log_file: PathBuf,
    /// Valid log entries parsed.
    pub total_entries: usize,
    /// Non-blank lines that were not valid entries.
    #[serde(default)]
    pub skipped_lines: usize,
    /// `PASS` iff every lab passed; vacuously `PASS` with no labs.
    pub overall_status: Verdict,
    pub summary: GradeSummary,
    pub improvement: ImprovementTotals,
    pub lab_results: BTreeMap<LabCategory, LabResult>,
}

impl GradeReport {
    /// Build the report from a finalized ledger.
    pub fn assemble(
        snapshot: &LedgerSnapshot,
        log_file: impl Into<PathBuf>,
        total_entries: usize,
        skipped_lines: usize,
    ) -> Self {
        let lab_results: BTreeMap<LabCategory, LabResult> = snapshot
            .categories()
            .into_iter()
            .map(|category| (category, LabResult::from_tasks(snapshot.tasks_in(category))))
            .collect();

        let mut summary = GradeSummary::default();
        let mut improvement = ImprovementTotals::default();
        for lab in lab_results.values() {
            summary.total_labs += 1;
            if lab.overall_status.is_pass() {
                summary.labs_passed += 1;
            } else {
                summary.labs_failed += 1;
            }
            summary.passed_tasks += lab.passed_tasks;
            summary.total_tasks += lab.total_tasks;
            summary.total_attempts += lab.total_attempts;

            improvement.first_try_successes += lab.improvement.first_try_success_count;
            improvement.retry_successes += lab.improvement.retry_success_count;
            improvement.persistent_failures += lab.improvement.persistent_failures;
            improvement.tasks_with_multiple_attempts +=
                lab.improvement.tasks_with_multiple_attempts;
        }
        improvement.improvement_shown = improvement.retry_successes > 0;

        let overall_status = if summary.labs_failed == 0 {
            Verdict::Pass
        } else {
            Verdict::Fail
        };

        tracing::info!(
            labs = summary.total_labs,
            tasks = summary.total_tasks,
            status = %overall_status,
            "report assembled"
        );

        Self {
            generated_at: Utc::now(),
            log_file: log_file.into(),
            total_entries,
            skipped_lines,
            overall_status,
            summary,
            improvement,
            lab_results,
        }
    }

    /// `true` when the log had no valid entries at all.
    pub fn is_empty(&self) -> bool {
        self.total_entries == 0
    }

    /// Labs that did not pass, in sorted order.
    pub fn failed_labs(&self) -> Vec<LabCategory> {
        self.lab_results
            .iter()
            .filter(|(_, lab)| !lab.overall_status.is_pass())
            .map(|(category, _)| *category)
            .collect()
    }

    /// Tasks still failing after more than one attempt, as `(lab, task)` pairs.
    pub fn persistent_failure_tasks(&self) -> Vec<(LabCategory, &str)> {
        self.lab_results
            .iter()
            .flat_map(|(category, lab)| {
                lab.tasks
                    .iter()
                    .filter(|(_, t)| t.trajectory() == TaskTrajectory::PersistentFailure)
                    .map(move |(name, _)| (*category, name.as_str()))
            })
            .collect()
    }

    /// Save the report as pretty-printed JSON, creating parent directories.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::AttemptLedger;
    use crate::model::{Event, Status};
    use chrono::NaiveDate;

    fn record(ledger: &mut AttemptLedger, line: usize, status: Status, cat: LabCategory, task: &str) {
        let event = Event {
            line_number: line,
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(10, line as u32, 0)
                .unwrap(),
            timestamp_fallback: false,
            status,
            message: task.to_lowercase(),
        };
        ledger.record(&event, cat, task);
    }

    fn sample_report() -> GradeReport {
        let mut ledger = AttemptLedger::new();
        let users = LabCategory::UserManagement;
        let nfs = LabCategory::NfsConfiguration;
        record(&mut ledger, 1, Status::Fail, users, "User Creation");
        record(&mut ledger, 2, Status::Pass, users, "User Creation");
        record(&mut ledger, 3, Status::Pass, users, "User Home Directory");
        record(&mut ledger, 4, Status::Fail, nfs, "NFS Mount");
        record(&mut ledger, 5, Status::Fail, nfs, "NFS Mount");
        record(&mut ledger, 6, Status::Pass, nfs, "FSTAB Configuration");
        GradeReport::assemble(&ledger.finalize(), "labresults.log", 6, 0)
    }

    #[test]
    fn lab_result_rollup() {
        let report = sample_report();
        let users = &report.lab_results[&LabCategory::UserManagement];
        assert_eq!(users.overall_status, Verdict::Pass);
        assert_eq!((users.passed_tasks, users.total_tasks), (2, 2));
        assert_eq!(users.total_attempts, 3);
        assert!((users.average_attempts - 1.5).abs() < f64::EPSILON);
        assert!((users.pass_rate - 100.0).abs() < f64::EPSILON);
        assert_eq!(users.improvement.retry_success_count, 1);
        assert_eq!(users.improvement.first_try_success_count, 1);

        let nfs = &report.lab_results[&LabCategory::NfsConfiguration];
        assert_eq!(nfs.overall_status, Verdict::Fail);
        assert!((nfs.pass_rate - 50.0).abs() < f64::EPSILON);
        assert_eq!(nfs.improvement.persistent_failures, 1);
    }

    #[test]
    fn grand_totals() {
        let report = sample_report();
        assert_eq!(report.overall_status, Verdict::Fail);
        assert_eq!(report.summary.total_labs, 2);
        assert_eq!(report.summary.labs_passed, 1);
        assert_eq!(report.summary.labs_failed, 1);
        assert_eq!(report.summary.passed_tasks, 3);
        assert_eq!(report.summary.total_tasks, 4);
        assert_eq!(report.summary.total_attempts, 6);
        assert_eq!(report.improvement.first_try_successes, 2);
        assert_eq!(report.improvement.retry_successes, 1);
        assert_eq!(report.improvement.persistent_failures, 1);
        assert_eq!(report.improvement.tasks_with_multiple_attempts, 2);
        assert!(report.improvement.improvement_shown);
    }

    #[test]
    fn pass_rate_bounds() {
        let report = sample_report();
        for lab in report.lab_results.values() {
            assert!(lab.passed_tasks <= lab.total_tasks);
            assert!((0.0..=100.0).contains(&lab.pass_rate));
        }
    }

    #[test]
    fn empty_lab_result_does_not_divide_by_zero() {
        let lab = LabResult::from_tasks(BTreeMap::new());
        assert_eq!(lab.pass_rate, 0.0);
        assert_eq!(lab.average_attempts, 0.0);
        assert_eq!(lab.overall_status, Verdict::Pass);
    }

    #[test]
    fn empty_report_is_vacuous_pass() {
        let report = GradeReport::assemble(&AttemptLedger::new().finalize(), "empty.log", 0, 0);
        assert!(report.is_empty());
        assert!(report.lab_results.is_empty());
        assert_eq!(report.overall_status, Verdict::Pass);
        assert_eq!(report.summary, GradeSummary::default());
        assert!(!report.improvement.improvement_shown);
    }

    #[test]
    fn failed_labs_and_persistent_failures() {
        let report = sample_report();
        assert_eq!(report.failed_labs(), vec![LabCategory::NfsConfiguration]);
        assert_eq!(
            report.persistent_failure_tasks(),
            vec![(LabCategory::NfsConfiguration, "NFS Mount")]
        );
    }

    #[test]
    fn save_json_writes_readable_report() {
        let report = sample_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("grade.json");

        report.save_json(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\n  \"overall_status\": \"FAIL\""));

        let saved: GradeReport = serde_json::from_str(&content).unwrap();
        assert_eq!(saved.summary, report.summary);
        assert_eq!(saved.lab_results, report.lab_results);
    }

    #[test]
    fn json_uses_lab_labels_and_status_tokens() {
        let json = serde_json::to_value(sample_report()).unwrap();
        assert_eq!(json["overall_status"], "FAIL");
        assert_eq!(
            json["lab_results"]["User Management"]["tasks"]["User Creation"]["status"],
            "PASS"
        );
    }
}
