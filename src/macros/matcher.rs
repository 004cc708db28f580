use std::path::Path;

use globset::{Glob, GlobMatcher};

use crate::errors::ConfigError;

use super::table::{MacroSet, MacroTable};

// @module: Glob-based resolution of macro sets per file

/// One compiled pattern entry, in table declaration order
#[derive(Debug, Clone)]
struct PatternEntry {
    pattern: String,
    matcher: GlobMatcher,
    macros: MacroSet,
}

/// Resolves which macro sets apply to a file name
///
/// Patterns use shell-glob semantics (`*`, `?`) and are matched against the
/// file's base name. Every pattern is compiled once up front so that a bad
/// glob fails the whole run before any file is touched.
#[derive(Debug, Clone, Default)]
pub struct PatternMatcher {
    entries: Vec<PatternEntry>,
}

impl PatternMatcher {
    /// Compile every pattern of a macro table
    pub fn new(table: &MacroTable) -> Result<Self, ConfigError> {
        let mut entries = Vec::with_capacity(table.len());
        for (pattern, macros) in table.entries() {
            let matcher = Glob::new(pattern)
                .map_err(|source| ConfigError::InvalidGlob {
                    pattern: pattern.to_string(),
                    source,
                })?
                .compile_matcher();
            entries.push(PatternEntry {
                pattern: pattern.to_string(),
                matcher,
                macros: macros.clone(),
            });
        }
        Ok(Self { entries })
    }

    /// Patterns matching a file, in declaration order
    pub fn matching_patterns(&self, file_name: &str) -> Vec<&str> {
        let base = base_name(file_name);
        self.entries
            .iter()
            .filter(|entry| entry.matcher.is_match(&base))
            .map(|entry| entry.pattern.as_str())
            .collect()
    }

    /// The union macro set for a file
    ///
    /// All matching pattern sets are merged in declaration order; this is a
    /// deliberate union policy so that file-specific macros layer on top of
    /// global ones. When two matched sets declare the same key, the
    /// later-declared entry's value wins.
    ///
    /// A file matching no pattern yields an empty set, which the engine
    /// treats as "pass through unchanged".
    pub fn resolve(&self, file_name: &str) -> MacroSet {
        let base = base_name(file_name);
        let mut merged = MacroSet::new();
        for entry in &self.entries {
            if !entry.matcher.is_match(&base) {
                continue;
            }
            for m in entry.macros.iter() {
                merged.insert(m.key.clone(), m.value.clone());
            }
        }
        merged
    }

    /// Number of compiled patterns
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the matcher holds no patterns at all
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Base name of a path-like file name; matching ignores directories
fn base_name(file_name: &str) -> String {
    Path::new(file_name)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| file_name.to_string())
}
