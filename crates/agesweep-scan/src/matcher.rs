//! Glob expansion over a single directory.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};

use agesweep_core::SweepError;

/// A compiled file name pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    matcher: GlobMatcher,
    /// Shell convention: `*` and `?` do not match a leading dot.
    matches_hidden: bool,
}

impl Pattern {
    /// Compile a shell-style pattern (`*`, `?`, `[...]`).
    pub fn new(pattern: &str) -> Result<Self, SweepError> {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .backslash_escape(true)
            .build()
            .map_err(|e| SweepError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.kind().to_string(),
            })?;

        Ok(Self {
            source: pattern.to_string(),
            matcher: glob.compile_matcher(),
            matches_hidden: pattern.starts_with('.'),
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Check a bare file name against the pattern.
    pub fn is_match(&self, name: &OsStr) -> bool {
        if !self.matches_hidden && name.as_encoded_bytes().first() == Some(&b'.') {
            return false;
        }
        self.matcher.is_match(Path::new(name))
    }

    /// List the entries of `dir` whose names match.
    ///
    /// Only the directory itself failing to open is an error. Entries that
    /// cannot be read while listing are skipped.
    pub fn expand(&self, dir: &Path) -> std::io::Result<Vec<PathBuf>> {
        let entries = std::fs::read_dir(dir)?;

        let mut matches = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    tracing::warn!(dir = %dir.display(), "Skipping unreadable entry: {err}");
                    continue;
                }
            };

            if self.is_match(&entry.file_name()) {
                matches.push(entry.path());
            }
        }

        tracing::debug!(pattern = %self, count = matches.len(), "Expanded pattern");
        Ok(matches)
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

/// The ordered list of patterns configured for a sweep.
#[derive(Debug, Clone)]
pub struct Matcher {
    patterns: Vec<Pattern>,
}

impl Matcher {
    /// Compile every pattern, failing on the first invalid one.
    pub fn new<I, S>(patterns: I) -> Result<Self, SweepError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| Pattern::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Compiled patterns, in configured order.
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }
}
