//! labgrade-core — Log parsing, task classification, and attempt-aware grading.
//!
//! This crate turns a lab-verification log into a [`report::GradeReport`]:
//! lines are parsed into events, classified into a lab category and task,
//! folded into an attempt ledger, and finally reduced into per-lab results
//! with improvement metrics.

pub mod classify;
pub mod config;
pub mod error;
pub mod grader;
pub mod improvement;
pub mod ledger;
pub mod model;
pub mod parser;
pub mod report;

pub use error::GradeError;
pub use grader::{grade_lines, grade_log};
pub use report::GradeReport;
