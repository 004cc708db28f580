use anyhow::{Context, Result};
use log::{info, warn};
use serde::Serialize;

use super::engine::SubstitutionResult;
use super::reverse::Collision;
use super::table::MacroSet;

// @module: Substitution diagnostics for files and batches

/// Per-key application count within one file, zero counts included
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyCount {
    /// Macro key
    pub key: String,

    /// Number of forward replacements performed for the key
    pub count: usize,
}

/// Everything the substitution passes did to one file
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileReport {
    /// File name the passes ran over
    pub file: String,

    /// Total forward replacements performed
    pub forward_replacements: usize,

    /// Total reverse replacements performed
    pub reverse_replacements: usize,

    /// Per-key forward counts, in declaration order of the resolved union
    pub key_counts: Vec<KeyCount>,

    /// Keys that never fired during the forward pass; usually a sign of a
    /// stale macro map
    pub unused_keys: Vec<String>,

    /// Collisions found while building the reverse map
    pub collisions: Vec<Collision>,
}

impl FileReport {
    /// Create an empty report for one file
    pub fn new(file: impl Into<String>) -> Self {
        FileReport {
            file: file.into(),
            ..Default::default()
        }
    }

    /// Record the outcome of the forward pass against the resolved set
    pub fn record_forward(&mut self, macros: &MacroSet, result: &SubstitutionResult) {
        self.forward_replacements = result.total();
        self.key_counts = macros
            .keys()
            .map(|key| KeyCount {
                key: key.to_string(),
                count: result.count_for_key(key),
            })
            .collect();
        self.unused_keys = result.unused_keys(macros);
    }

    /// Record the outcome of the reverse pass
    pub fn record_reverse(&mut self, result: &SubstitutionResult) {
        self.reverse_replacements = result.total();
    }

    /// Record collisions found while building the reverse map
    pub fn record_collisions(&mut self, collisions: &[Collision]) {
        self.collisions = collisions.to_vec();
    }

    /// Whether the reverse map for this file was ambiguous
    pub fn has_collisions(&self) -> bool {
        !self.collisions.is_empty()
    }
}

/// Batch-level substitution report, one entry per processed file
#[derive(Debug, Clone, Default, Serialize)]
pub struct SubstitutionReport {
    /// Per-file reports, in completion order
    pub files: Vec<FileReport>,
}

impl SubstitutionReport {
    /// Create an empty batch report
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the report for one file
    pub fn add_file(&mut self, report: FileReport) {
        self.files.push(report);
    }

    /// Total forward replacements across the batch
    pub fn total_forward(&self) -> usize {
        self.files.iter().map(|f| f.forward_replacements).sum()
    }

    /// Total reverse replacements across the batch
    pub fn total_reverse(&self) -> usize {
        self.files.iter().map(|f| f.reverse_replacements).sum()
    }

    /// Number of collision records across the batch
    pub fn collision_count(&self) -> usize {
        self.files.iter().map(|f| f.collisions.len()).sum()
    }

    /// Files whose forward pass left at least one declared key unused
    pub fn files_with_unused_keys(&self) -> Vec<&FileReport> {
        self.files
            .iter()
            .filter(|f| !f.unused_keys.is_empty())
            .collect()
    }

    /// Render the report to the log: one info line for totals, one warn
    /// line per collision and per file with unused keys
    pub fn log_summary(&self) {
        info!(
            "Macro substitution: {} forward and {} reverse replacements across {} file(s)",
            self.total_forward(),
            self.total_reverse(),
            self.files.len()
        );

        for file in &self.files {
            for collision in &file.collisions {
                warn!(
                    "{}: value '{}' is shared by macros {:?}; reversal restored '{}' and cannot be accurate for the others",
                    file.file,
                    collision.value,
                    collision.keys,
                    collision.keys.last().map(String::as_str).unwrap_or_default()
                );
            }
            if !file.unused_keys.is_empty() {
                warn!(
                    "{}: macro key(s) {:?} never matched; the macro map may be stale",
                    file.file, file.unused_keys
                );
            }
        }
    }

    /// Serialize the report as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize substitution report")
    }
}
