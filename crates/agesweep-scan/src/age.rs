//! Age evaluation of candidate files.

use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use chrono::TimeDelta;

use agesweep_core::{FileError, TimestampSource};

/// Age of a file measured at a reference time.
#[derive(Debug, Clone)]
pub struct FileAge {
    /// Path that was evaluated.
    pub path: PathBuf,
    /// Timestamp the age was computed from.
    pub timestamp: SystemTime,
    /// Reference time minus timestamp. Negative for future-dated files.
    pub age: TimeDelta,
    /// File size in bytes at evaluation time.
    pub size: u64,
}

impl FileAge {
    /// Whether the timestamp lies after the reference time.
    pub fn is_future_dated(&self) -> bool {
        self.age < TimeDelta::zero()
    }
}

/// Signed difference `now - then`, saturating at the bounds of [`TimeDelta`].
pub fn signed_age(now: SystemTime, then: SystemTime) -> TimeDelta {
    match now.duration_since(then) {
        Ok(elapsed) => TimeDelta::from_std(elapsed).unwrap_or(TimeDelta::MAX),
        Err(err) => TimeDelta::from_std(err.duration())
            .map(|ahead| -ahead)
            .unwrap_or(TimeDelta::MIN),
    }
}

/// Reads a file's timestamp and computes its age.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgeEvaluator {
    source: TimestampSource,
}

impl AgeEvaluator {
    /// Create an evaluator for the given timestamp source.
    pub fn new(source: TimestampSource) -> Self {
        Self { source }
    }

    /// Compute the age of `path` relative to `now`.
    ///
    /// Fails with [`FileError::Stat`] when the metadata cannot be read,
    /// including the file having vanished since it was listed.
    pub fn evaluate(&self, path: &Path, now: SystemTime) -> Result<FileAge, FileError> {
        let metadata = std::fs::metadata(path).map_err(|e| FileError::stat(path, e))?;
        let timestamp = self
            .timestamp(&metadata)
            .map_err(|e| FileError::stat(path, e))?;

        Ok(FileAge {
            path: path.to_path_buf(),
            timestamp,
            age: signed_age(now, timestamp),
            size: metadata.len(),
        })
    }

    fn timestamp(&self, metadata: &Metadata) -> std::io::Result<SystemTime> {
        match self.source {
            TimestampSource::Modified => metadata.modified(),
            TimestampSource::Created => match metadata.created() {
                Ok(created) => Ok(created),
                #[cfg(unix)]
                Err(err) if err.kind() == std::io::ErrorKind::Unsupported => {
                    Ok(status_change_time(metadata))
                }
                Err(err) => Err(err),
            },
        }
    }
}

/// Inode status-change time, used where the filesystem keeps no birth time.
#[cfg(unix)]
fn status_change_time(metadata: &Metadata) -> SystemTime {
    use std::os::unix::fs::MetadataExt;

    from_unix_parts(metadata.ctime(), metadata.ctime_nsec())
}

/// `secs` whole seconds from the epoch (possibly negative) plus `nsec` forward.
#[cfg(unix)]
fn from_unix_parts(secs: i64, nsec: i64) -> SystemTime {
    let whole = Duration::from_secs(secs.unsigned_abs());
    let base = if secs >= 0 {
        SystemTime::UNIX_EPOCH + whole
    } else {
        SystemTime::UNIX_EPOCH - whole
    };
    base + Duration::from_nanos(nsec.clamp(0, 999_999_999) as u64)
}

/// The retention rule: a file is expired once its age strictly exceeds the maximum.
#[derive(Debug, Clone, Copy)]
pub struct RetentionPolicy {
    max_age: Duration,
}

impl RetentionPolicy {
    /// Create a policy retaining files up to `max_age`.
    pub fn new(max_age: Duration) -> Self {
        Self { max_age }
    }

    /// Maximum retained age.
    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Whether a file of the given age should be deleted.
    pub fn is_expired(&self, age: TimeDelta) -> bool {
        match TimeDelta::from_std(self.max_age) {
            Ok(limit) => age > limit,
            // Larger than any representable age
            Err(_) => false,
        }
    }
}
