//! Core data model types for labgrade.
//!
//! These are the types every stage of the pipeline shares: parsed log
//! events, their normalized status, lab categories, and per-task outcomes.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Normalized status of a single log event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Pass,
    Fail,
    Partial,
    Info,
}

impl Status {
    /// The decisive outcome of this status, if it has one.
    ///
    /// Only `PASS` and `FAIL` decide a task; `PARTIAL` and `INFO` are history only.
    pub fn verdict(self) -> Option<Verdict> {
        match self {
            Status::Pass => Some(Verdict::Pass),
            Status::Fail => Some(Verdict::Fail),
            Status::Partial | Status::Info => None,
        }
    }

    /// Returns `true` for `PASS` and `FAIL`.
    pub fn is_decisive(self) -> bool {
        self.verdict().is_some()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Status::Pass => "PASS",
            Status::Fail => "FAIL",
            Status::Partial => "PARTIAL",
            Status::Info => "INFO",
        })
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PASS" => Ok(Status::Pass),
            "FAIL" => Ok(Status::Fail),
            "PARTIAL" => Ok(Status::Partial),
            "INFO" => Ok(Status::Info),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

/// A decisive outcome: the only statuses a graded task or lab can end with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn is_pass(self) -> bool {
        self == Verdict::Pass
    }

    /// Check mark used by the renderers.
    pub fn symbol(self) -> &'static str {
        match self {
            Verdict::Pass => "✓",
            Verdict::Fail => "✗",
        }
    }
}

impl From<Verdict> for Status {
    fn from(v: Verdict) -> Self {
        match v {
            Verdict::Pass => Status::Pass,
            Verdict::Fail => Status::Fail,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Status::from(*self), f)
    }
}

/// Coarse grouping of tasks used for per-lab rollups.
///
/// Variants are declared in alphabetical order of their labels so that the
/// derived `Ord` lists labs the way every report sorts them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LabCategory {
    #[serde(rename = "File System")]
    FileSystem,
    #[serde(rename = "General")]
    General,
    #[serde(rename = "NFS Configuration")]
    NfsConfiguration,
    #[serde(rename = "Network Services")]
    NetworkServices,
    #[serde(rename = "Package Management")]
    PackageManagement,
    #[serde(rename = "User Management")]
    UserManagement,
}

impl LabCategory {
    pub const ALL: [LabCategory; 6] = [
        LabCategory::FileSystem,
        LabCategory::General,
        LabCategory::NfsConfiguration,
        LabCategory::NetworkServices,
        LabCategory::PackageManagement,
        LabCategory::UserManagement,
    ];

    /// Human-readable label, identical to the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            LabCategory::FileSystem => "File System",
            LabCategory::General => "General",
            LabCategory::NfsConfiguration => "NFS Configuration",
            LabCategory::NetworkServices => "Network Services",
            LabCategory::PackageManagement => "Package Management",
            LabCategory::UserManagement => "User Management",
        }
    }
}

impl fmt::Display for LabCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for LabCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LabCategory::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown lab category: {s}"))
    }
}

/// One valid log line, parsed and normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// 1-based position in the source log, for diagnostics.
    pub line_number: usize,
    /// When the result was logged (or the wall-clock fallback).
    pub timestamp: NaiveDateTime,
    /// Whether `timestamp` is the wall-clock fallback.
    #[serde(default)]
    pub timestamp_fallback: bool,
    pub status: Status,
    /// Free-text description, trimmed.
    pub message: String,
}

/// One entry in a task's attempt history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    pub timestamp: NaiveDateTime,
    pub status: Status,
    pub lab_category: LabCategory,
    pub message: String,
}

/// The resolved state of a task after the whole log has been read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskOutcome {
    /// Status of the last decisive event, in arrival order.
    pub status: Verdict,
    /// Number of decisive events recorded for the task.
    pub attempts: u32,
    /// Timestamp of the last decisive event.
    pub timestamp: NaiveDateTime,
    /// Category of the last decisive event.
    pub lab_category: LabCategory,
}
