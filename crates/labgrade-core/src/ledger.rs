//! Per-task attempt history.
//!
//! [`AttemptLedger`] is the accumulation phase: events are folded in one at a
//! time in file order. [`AttemptLedger::finalize`] ends accumulation and
//! yields a read-only [`LedgerSnapshot`] for the aggregation phase.

use std::collections::BTreeMap;

use crate::model::{Attempt, Event, LabCategory, TaskOutcome};

/// Accumulates events per task name in arrival order.
#[derive(Debug, Clone, Default)]
pub struct AttemptLedger {
    attempts: BTreeMap<String, Vec<Attempt>>,
    final_status: BTreeMap<String, TaskOutcome>,
}

impl AttemptLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one classified event.
    ///
    /// Every event is appended to the task's history. Decisive events also
    /// overwrite the task's final status, so the last `PASS`/`FAIL` in file
    /// order wins regardless of timestamps.
    pub fn record(&mut self, event: &Event, category: LabCategory, task_name: &str) {
        let history = self.attempts.entry(task_name.to_string()).or_default();
        history.push(Attempt {
            timestamp: event.timestamp,
            status: event.status,
            lab_category: category,
            message: event.message.clone(),
        });

        let Some(verdict) = event.status.verdict() else {
            return;
        };
        let decisive = history.iter().filter(|a| a.status.is_decisive()).count() as u32;

        self.final_status.insert(
            task_name.to_string(),
            TaskOutcome {
                status: verdict,
                attempts: decisive,
                timestamp: event.timestamp,
                lab_category: category,
            },
        );
    }

    /// Stop accumulating and freeze the ledger.
    pub fn finalize(self) -> LedgerSnapshot {
        LedgerSnapshot {
            attempts: self.attempts,
            final_status: self.final_status,
        }
    }
}

/// Read-only view of a fully populated ledger.
#[derive(Debug, Clone, Default)]
pub struct LedgerSnapshot {
    attempts: BTreeMap<String, Vec<Attempt>>,
    final_status: BTreeMap<String, TaskOutcome>,
}

impl LedgerSnapshot {
    /// Final outcome of a task, if it was ever decided.
    pub fn task(&self, task_name: &str) -> Option<&TaskOutcome> {
        self.final_status.get(task_name)
    }

    /// Full attempt history of a task, decisive or not.
    pub fn attempts(&self, task_name: &str) -> &[Attempt] {
        self.attempts
            .get(task_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Decided tasks whose last decisive event fell in `category`, by task name.
    pub fn tasks_in(&self, category: LabCategory) -> BTreeMap<String, TaskOutcome> {
        self.final_status
            .iter()
            .filter(|(_, outcome)| outcome.lab_category == category)
            .map(|(name, outcome)| (name.clone(), outcome.clone()))
            .collect()
    }

    /// Categories that have at least one decided task, in sorted order.
    pub fn categories(&self) -> Vec<LabCategory> {
        let mut categories: Vec<LabCategory> = self
            .final_status
            .values()
            .map(|outcome| outcome.lab_category)
            .collect();
        categories.sort();
        categories.dedup();
        categories
    }

    /// All decided tasks.
    pub fn decided_tasks(&self) -> impl Iterator<Item = (&str, &TaskOutcome)> {
        self.final_status.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Tasks that have history but no `PASS`/`FAIL` event. They appear in no lab result.
    pub fn undecided_tasks(&self) -> impl Iterator<Item = &str> {
        self.attempts
            .keys()
            .filter(|name| !self.final_status.contains_key(*name))
            .map(String::as_str)
    }
}
