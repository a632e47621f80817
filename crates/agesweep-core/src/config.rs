//! Sweep configuration types.

use std::path::{Path, PathBuf};
use std::time::Duration;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

const SECS: u64 = 1;
const MINS: u64 = 60 * SECS;
const HOURS: u64 = 60 * MINS;
const DAYS: u64 = 24 * HOURS;

/// Files older than this are deleted unless configured otherwise.
pub const DEFAULT_MAX_FILE_AGE: Duration = Duration::from_secs(5 * DAYS);

/// Time between two scans unless configured otherwise.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(DAYS);

/// Media segment names produced by the indexer, plus their converted copies.
pub const DEFAULT_PATTERNS: &[&str] = &["mca-???????????.*", "mca-???????????-conv.mpg"];

/// Which filesystem timestamp a file's age is measured from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampSource {
    /// Last modification time.
    #[default]
    Modified,
    /// Creation (birth) time.
    Created,
}

impl TimestampSource {
    /// Map the `use_creation_time` switch onto a timestamp source.
    pub fn from_creation_flag(use_creation_time: bool) -> Self {
        if use_creation_time {
            Self::Created
        } else {
            Self::Modified
        }
    }
}

impl std::fmt::Display for TimestampSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Modified => write!(f, "modification time"),
            Self::Created => write!(f, "creation time"),
        }
    }
}

/// Configuration for the sweeper. Built once at startup, read-only afterwards.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct SweepConfig {
    /// Directory to monitor.
    #[builder(default = "PathBuf::from(\".\")")]
    pub path: PathBuf,

    /// Maximum age of files to retain.
    #[builder(default = "DEFAULT_MAX_FILE_AGE")]
    pub max_file_age: Duration,

    /// Time between scans. Zero runs a single scan.
    #[builder(default = "DEFAULT_INTERVAL")]
    pub interval: Duration,

    /// Timestamp used to compute a file's age.
    #[builder(default)]
    #[serde(default)]
    pub timestamp_source: TimestampSource,

    /// Glob patterns matched against file names in `path`.
    #[builder(default = "default_patterns()")]
    #[serde(default = "default_patterns")]
    pub patterns: Vec<String>,
}

fn default_patterns() -> Vec<String> {
    DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect()
}

impl SweepConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref path) = self.path
            && path.as_os_str().is_empty()
        {
            return Err("Path cannot be empty".to_string());
        }

        if let Some(ref patterns) = self.patterns {
            if patterns.is_empty() {
                return Err("At least one pattern is required".to_string());
            }
            for pattern in patterns {
                if pattern.is_empty() {
                    return Err("Patterns cannot be empty".to_string());
                }
                if pattern.contains('/') || pattern.contains(std::path::MAIN_SEPARATOR) {
                    return Err(format!(
                        "Pattern '{pattern}' must match file names, not paths"
                    ));
                }
            }
        }
        Ok(())
    }
}

impl SweepConfig {
    /// Create a new config builder.
    pub fn builder() -> SweepConfigBuilder {
        SweepConfigBuilder::default()
    }

    /// Create a config with default settings for the given directory.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_file_age: DEFAULT_MAX_FILE_AGE,
            interval: DEFAULT_INTERVAL,
            timestamp_source: TimestampSource::Modified,
            patterns: default_patterns(),
        }
    }

    /// Directory being monitored.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the scheduler should stop after the first scan.
    pub fn is_single_pass(&self) -> bool {
        self.interval.is_zero()
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
