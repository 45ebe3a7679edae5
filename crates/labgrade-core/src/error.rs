//! Grading error types.
//!
//! Only setup problems are errors. Malformed log content degrades gracefully
//! inside the parser and classifier and never surfaces here.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can abort a grading run.
#[derive(Debug, Error)]
pub enum GradeError {
    /// The log file to grade does not exist.
    #[error("log file {} not found", .0.display())]
    LogFileNotFound(PathBuf),

    /// The log file exists but could not be read.
    #[error("failed to read log file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GradeError {
    /// Returns `true` for the named, expected failure (missing input).
    pub fn is_expected(&self) -> bool {
        matches!(self, GradeError::LogFileNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_expected() {
        let err = GradeError::LogFileNotFound(PathBuf::from("labresults.log"));
        assert!(err.is_expected());
        assert_eq!(err.to_string(), "log file labresults.log not found");
    }

    #[test]
    fn io_failure_is_unexpected() {
        let err = GradeError::Io {
            path: PathBuf::from("labresults.log"),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, "bad utf-8"),
        };
        assert!(!err.is_expected());
        assert!(std::error::Error::source(&err).is_some());
    }
}
