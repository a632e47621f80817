//! Candidate discovery for agesweep.
//!
//! This crate answers two questions for a scan cycle:
//!
//! - **Which files are candidates?** [`Matcher`] expands shell-style glob
//!   patterns against the names in a single directory (no recursion).
//! - **Which candidates are too old?** [`AgeEvaluator`] reads the chosen
//!   timestamp and [`RetentionPolicy`] applies the strict age threshold.
//!
//! ```rust,no_run
//! use std::path::Path;
//! use std::time::{Duration, SystemTime};
//!
//! use agesweep_scan::{AgeEvaluator, Matcher, RetentionPolicy, TimestampSource};
//!
//! let matcher = Matcher::new(["mca-???????????.*"]).unwrap();
//! let evaluator = AgeEvaluator::new(TimestampSource::Modified);
//! let policy = RetentionPolicy::new(Duration::from_secs(5 * 24 * 60 * 60));
//! let now = SystemTime::now();
//!
//! for pattern in matcher.patterns() {
//!     for path in pattern.expand(Path::new("/var/index")).unwrap() {
//!         if let Ok(age) = evaluator.evaluate(&path, now) {
//!             println!("{} expired: {}", path.display(), policy.is_expired(age.age));
//!         }
//!     }
//! }
//! ```

mod age;
mod matcher;

pub use age::{AgeEvaluator, FileAge, RetentionPolicy, signed_age};
pub use matcher::{Matcher, Pattern};

// Re-export core types for convenience
pub use agesweep_core::{FileError, SweepError, TimestampSource};
