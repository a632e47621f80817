//! Per-cycle reporting.

use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use agesweep_core::FileError;

/// Outcome of one scan cycle.
#[derive(Debug)]
pub struct CycleReport {
    /// Reference time ages were measured against.
    pub started_at: SystemTime,
    /// Unique paths matched by at least one pattern.
    pub candidates: usize,
    /// Candidates young enough to keep.
    pub retained: usize,
    /// Why the monitored directory could not be listed, if it could not.
    pub directory_error: Option<std::io::Error>,
    /// Candidates whose timestamp could not be read.
    pub skipped: Vec<FileError>,
    /// Expired files that were removed.
    pub deleted: Vec<PathBuf>,
    /// Expired files that could not be removed.
    pub failed: Vec<FileError>,
    /// Total size of removed files.
    pub bytes_freed: u64,
    /// Wall time spent on the cycle.
    pub elapsed: Duration,
}

impl CycleReport {
    /// Create an empty report for a cycle starting at `started_at`.
    pub fn new(started_at: SystemTime) -> Self {
        Self {
            started_at,
            candidates: 0,
            retained: 0,
            directory_error: None,
            skipped: Vec::new(),
            deleted: Vec::new(),
            failed: Vec::new(),
            bytes_freed: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Number of candidates past the retention threshold.
    pub fn expired(&self) -> usize {
        self.deleted.len() + self.failed.len()
    }

    /// Whether no candidate was past the threshold.
    pub fn nothing_found(&self) -> bool {
        self.expired() == 0
    }

    /// Whether every expired file was removed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Get a human-readable summary of the cycle.
    pub fn summary(&self) -> String {
        let freed = humansize::format_size(self.bytes_freed, humansize::BINARY);
        let mut msg = format!(
            "{} candidates, {} retained, deleted {} (freed {})",
            self.candidates,
            self.retained,
            self.deleted.len(),
            freed
        );
        if !self.failed.is_empty() {
            msg.push_str(&format!(", {} failed", self.failed.len()));
        }
        if !self.skipped.is_empty() {
            msg.push_str(&format!(", {} skipped", self.skipped.len()));
        }
        if self.directory_error.is_some() {
            msg.push_str(", directory unreadable");
        }
        msg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report() {
        let report = CycleReport::new(SystemTime::now());
        assert!(report.nothing_found());
        assert!(report.is_success());
        assert!(report.summary().starts_with("0 candidates, 0 retained, deleted 0"));
    }

    #[test]
    fn test_summary_with_failures() {
        let mut report = CycleReport::new(SystemTime::now());
        report.candidates = 4;
        report.retained = 1;
        report.deleted.push(PathBuf::from("./mca-00000000001.mpg"));
        report.bytes_freed = 2048;
        report.failed.push(FileError::delete(
            "./mca-00000000002.mpg",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        ));
        report.skipped.push(FileError::stat(
            "./mca-00000000003.mpg",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        ));

        assert_eq!(report.expired(), 2);
        assert!(!report.is_success());
        let summary = report.summary();
        assert!(summary.starts_with("4 candidates, 1 retained, deleted 1 (freed 2"));
        assert!(summary.ends_with(", 1 failed, 1 skipped"));
    }

    #[test]
    fn test_summary_unreadable_directory() {
        let mut report = CycleReport::new(SystemTime::now());
        report.directory_error = Some(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "unmounted",
        ));
        assert!(report.nothing_found());
        assert!(report.summary().ends_with(", directory unreadable"));
    }
}
