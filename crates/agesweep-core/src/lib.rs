//! Core types for agesweep.
//!
//! This crate provides the types shared by the rest of the workspace:
//! the immutable sweep configuration, the error taxonomy that separates
//! per-file failures from fatal ones, and duration parsing/formatting.

mod config;
mod duration;
mod error;

pub use config::{
    DEFAULT_INTERVAL, DEFAULT_MAX_FILE_AGE, DEFAULT_PATTERNS, SweepConfig, SweepConfigBuilder,
    TimestampSource,
};
pub use duration::{DurationParseError, format_age, parse_duration};
pub use error::{FileError, SweepError};
