//! Human-friendly durations for the command line and log output.

use std::time::Duration;

use thiserror::Error;

/// Error returned by [`parse_duration`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationParseError {
    /// Input was empty.
    #[error("duration is empty")]
    Empty,

    /// A term had no leading number.
    #[error("expected a number in '{input}'")]
    MissingNumber { input: String },

    /// A number was not followed by a unit.
    #[error("missing unit after {value} in '{input}' (use w, d, h, m or s)")]
    MissingUnit { input: String, value: u64 },

    /// Unrecognized unit character.
    #[error("unknown unit '{unit}' in '{input}' (use w, d, h, m or s)")]
    UnknownUnit { input: String, unit: char },

    /// The total does not fit in a `Duration`.
    #[error("duration '{input}' is too large")]
    Overflow { input: String },
}

/// Parse a duration string such as `5d`, `1d12h`, `90m` or `3600`.
///
/// A bare integer is a number of seconds, so `0` parses to [`Duration::ZERO`].
/// Otherwise the input is a sequence of `<number><unit>` terms, with units
/// `w` (weeks), `d` (days), `h` (hours), `m` (minutes) and `s` (seconds).
pub fn parse_duration(s: &str) -> Result<Duration, DurationParseError> {
    let input = s.trim().to_lowercase();
    if input.is_empty() {
        return Err(DurationParseError::Empty);
    }

    if input.chars().all(|c| c.is_ascii_digit()) {
        let secs = input
            .parse::<u64>()
            .map_err(|_| DurationParseError::Overflow { input: input.clone() })?;
        return Ok(Duration::from_secs(secs));
    }

    let mut total: u64 = 0;
    let terms: Vec<char> = input.chars().filter(|c| !c.is_whitespace()).collect();
    let mut chars = terms.into_iter().peekable();

    while chars.peek().is_some() {
        let mut digits = String::new();
        while let Some(c) = chars.peek().copied().filter(char::is_ascii_digit) {
            digits.push(c);
            chars.next();
        }
        if digits.is_empty() {
            return Err(DurationParseError::MissingNumber { input });
        }
        let value: u64 = digits
            .parse()
            .map_err(|_| DurationParseError::Overflow { input: input.clone() })?;

        let multiplier = match chars.next() {
            Some('w') => 7 * 24 * 60 * 60,
            Some('d') => 24 * 60 * 60,
            Some('h') => 60 * 60,
            Some('m') => 60,
            Some('s') => 1,
            Some(unit) => return Err(DurationParseError::UnknownUnit { input, unit }),
            None => return Err(DurationParseError::MissingUnit { input, value }),
        };

        total = value
            .checked_mul(multiplier)
            .and_then(|secs| total.checked_add(secs))
            .ok_or_else(|| DurationParseError::Overflow { input: input.clone() })?;
    }

    Ok(Duration::from_secs(total))
}

/// Format a duration as a human-readable string.
pub fn format_age(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs < 60 {
        format!("{secs} seconds")
    } else if secs < 3600 {
        format!("{} minutes", secs / 60)
    } else if secs < 86400 {
        format!("{} hours", secs / 3600)
    } else if secs % 86400 == 0 {
        format!("{} days", secs / 86400)
    } else {
        format!("{:.1} days", secs as f64 / 86400.0)
    }
}
