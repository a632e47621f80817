//! One enumerate-stat-delete pass over the monitored directory.

use std::path::PathBuf;
use std::time::{Instant, SystemTime};

use indexmap::IndexSet;

use agesweep_core::{SweepConfig, SweepError, format_age};
use agesweep_scan::{AgeEvaluator, FileAge, Matcher, RetentionPolicy};

use crate::purge::purge_file;
use crate::report::CycleReport;

/// Unique candidate paths in discovery order.
pub type CandidateSet = IndexSet<PathBuf>;

/// A single scan-and-purge pass. Holds no state between runs.
#[derive(Debug, Clone)]
pub struct ScanCycle {
    directory: PathBuf,
    matcher: Matcher,
    evaluator: AgeEvaluator,
    policy: RetentionPolicy,
}

impl ScanCycle {
    /// Build a cycle from the sweep configuration, compiling its patterns.
    pub fn new(config: &SweepConfig) -> Result<Self, SweepError> {
        Ok(Self {
            directory: config.path.clone(),
            matcher: Matcher::new(&config.patterns)?,
            evaluator: AgeEvaluator::new(config.timestamp_source),
            policy: RetentionPolicy::new(config.max_file_age),
        })
    }

    /// Expand every pattern and merge the results.
    ///
    /// A file matched by several patterns appears once. Fails only when the
    /// directory itself cannot be listed.
    pub fn collect_candidates(&self) -> std::io::Result<CandidateSet> {
        let mut candidates = CandidateSet::new();
        for pattern in self.matcher.patterns() {
            candidates.extend(pattern.expand(&self.directory)?);
        }
        Ok(candidates)
    }

    /// Evaluate each candidate and return those past the threshold.
    ///
    /// Stat failures and retained files are recorded in `report`.
    pub fn find_expired(
        &self,
        candidates: &CandidateSet,
        now: SystemTime,
        report: &mut CycleReport,
    ) -> Vec<FileAge> {
        let mut expired = Vec::new();

        for path in candidates {
            match self.evaluator.evaluate(path, now) {
                Ok(age) if self.policy.is_expired(age.age) => expired.push(age),
                Ok(age) => {
                    tracing::trace!(path = %path.display(), age = %age.age, "Retaining");
                    report.retained += 1;
                }
                Err(err) => {
                    if err.is_vanished() {
                        tracing::info!("Skipping: {err}");
                    } else {
                        tracing::warn!("Skipping: {err}");
                    }
                    report.skipped.push(err);
                }
            }
        }

        expired
    }

    /// Run a cycle measured against the current time.
    pub fn run(&self) -> CycleReport {
        self.run_at(SystemTime::now())
    }

    /// Run a cycle measured against `now`.
    ///
    /// An unreadable directory yields an empty cycle; the next run tries again.
    pub fn run_at(&self, now: SystemTime) -> CycleReport {
        let start = Instant::now();
        let mut report = CycleReport::new(now);

        tracing::info!(
            "Scanning files in {} (older than {})...",
            self.directory.display(),
            format_age(self.policy.max_age())
        );

        let candidates = match self.collect_candidates() {
            Ok(candidates) => candidates,
            Err(err) => {
                tracing::warn!("Cannot read directory {}: {err}", self.directory.display());
                report.directory_error = Some(err);
                CandidateSet::new()
            }
        };
        report.candidates = candidates.len();

        let expired = self.find_expired(&candidates, now, &mut report);
        if expired.is_empty() {
            tracing::info!("Nothing found");
        }

        for file in expired {
            match purge_file(&file.path) {
                Ok(()) => {
                    tracing::info!("Deleted \"{}\"", file.path.display());
                    report.bytes_freed += file.size;
                    report.deleted.push(file.path);
                }
                Err(err) => {
                    tracing::warn!("Failed to remove \"{}\": {}", file.path.display(), err.io_error());
                    report.failed.push(err);
                }
            }
        }

        report.elapsed = start.elapsed();
        tracing::info!("{}", report.summary());
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::path::Path;
    use std::time::Duration;
    use tempfile::TempDir;

    const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    fn touch(path: &Path, modified: SystemTime) {
        File::create(path).unwrap().set_modified(modified).unwrap();
    }

    #[test]
    fn test_candidates_are_deduplicated() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("mca-00000000001.mpg"), SystemTime::now());

        let config = SweepConfig::builder()
            .path(temp.path())
            .patterns(vec!["mca-*".to_string(), "*.mpg".to_string()])
            .build()
            .unwrap();
        let cycle = ScanCycle::new(&config).unwrap();

        let candidates = cycle.collect_candidates().unwrap();
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn test_find_expired_records_retained_and_skipped() {
        let temp = TempDir::new().unwrap();
        let now = SystemTime::now();
        let old = temp.path().join("mca-00000000001.mpg");
        let young = temp.path().join("mca-00000000002.mpg");
        touch(&old, now - 6 * DAY);
        touch(&young, now - 3 * DAY);

        let cycle = ScanCycle::new(&SweepConfig::new(temp.path())).unwrap();
        let mut candidates = cycle.collect_candidates().unwrap();
        candidates.insert(temp.path().join("mca-00000000009.mpg"));

        let mut report = CycleReport::new(now);
        let expired = cycle.find_expired(&candidates, now, &mut report);

        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].path, old);
        assert_eq!(report.retained, 1);
        assert_eq!(report.skipped.len(), 1);
        assert!(old.exists(), "find_expired must not delete");
    }
}
