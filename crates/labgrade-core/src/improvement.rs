//! Improvement metrics: did the learner get there, and how many tries did it take?

use serde::{Deserialize, Serialize};

use crate::model::{TaskOutcome, Verdict};

/// Outcome trajectory of a single finalized task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskTrajectory {
    /// Passed on the only decisive attempt.
    FirstTrySuccess,
    /// Passed in the end after more than one decisive attempt.
    RetrySuccess,
    /// Still failing after more than one decisive attempt.
    PersistentFailure,
    /// A single failed attempt, or no decisive attempt at all.
    Unclassified,
}

impl TaskTrajectory {
    pub fn of(attempts: u32, status: Verdict) -> Self {
        match (attempts, status) {
            (1, Verdict::Pass) => TaskTrajectory::FirstTrySuccess,
            (n, Verdict::Pass) if n > 1 => TaskTrajectory::RetrySuccess,
            (n, Verdict::Fail) if n > 1 => TaskTrajectory::PersistentFailure,
            _ => TaskTrajectory::Unclassified,
        }
    }

    /// Progress marker used by the renderers.
    pub fn icon(self) -> &'static str {
        match self {
            TaskTrajectory::FirstTrySuccess => "⚡",
            TaskTrajectory::RetrySuccess => "📈",
            TaskTrajectory::PersistentFailure => "🔄",
            TaskTrajectory::Unclassified => "",
        }
    }
}

impl TaskOutcome {
    pub fn trajectory(&self) -> TaskTrajectory {
        TaskTrajectory::of(self.attempts, self.status)
    }
}

/// Improvement counters for a set of finalized tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImprovementMetrics {
    pub first_try_success_count: u32,
    pub retry_success_count: u32,
    pub persistent_failures: u32,
    pub max_attempts: u32,
    pub tasks_with_multiple_attempts: u32,
}

impl ImprovementMetrics {
    /// Reduce a set of finalized tasks. Order does not matter.
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a TaskOutcome>) -> Self {
        tasks.into_iter().fold(Self::default(), |mut acc, task| {
            acc.max_attempts = acc.max_attempts.max(task.attempts);
            if task.attempts > 1 {
                acc.tasks_with_multiple_attempts += 1;
            }
            match task.trajectory() {
                TaskTrajectory::FirstTrySuccess => acc.first_try_success_count += 1,
                TaskTrajectory::RetrySuccess => acc.retry_success_count += 1,
                TaskTrajectory::PersistentFailure => acc.persistent_failures += 1,
                TaskTrajectory::Unclassified => {}
            }
            acc
        })
    }
}
