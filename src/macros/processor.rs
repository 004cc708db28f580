use std::path::Path;

use crate::errors::ConfigError;

use super::engine::{SubstitutionEngine, SubstitutionResult};
use super::matcher::PatternMatcher;
use super::reverse::{Collision, ReverseMacroSet};
use super::table::{MacroSet, MacroTable};

// @module: Facade tying macro resolution and both passes together

/// Pattern-scoped macro processor for one migration batch
///
/// Holds the immutable macro table and its compiled matchers. Per-file
/// resolution and reverse-map construction happen fresh on every call, so a
/// single processor can serve any number of files from concurrent tasks.
#[derive(Debug, Clone)]
pub struct MacroProcessor {
    table: MacroTable,
    matcher: PatternMatcher,
}

impl MacroProcessor {
    /// Build a processor from an already-parsed macro table
    pub fn new(table: MacroTable) -> Result<Self, ConfigError> {
        let matcher = PatternMatcher::new(&table)?;
        Ok(Self { table, matcher })
    }

    /// Load the macro map document from a file and build a processor
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::new(MacroTable::from_file(path)?)
    }

    /// Parse a macro map document and build a processor
    pub fn from_yaml_str(document: &str) -> Result<Self, ConfigError> {
        Self::new(MacroTable::from_yaml_str(document)?)
    }

    /// A processor with no macros at all; both passes pass text through
    pub fn empty() -> Self {
        Self {
            table: MacroTable::empty(),
            matcher: PatternMatcher::default(),
        }
    }

    /// The underlying macro table
    pub fn table(&self) -> &MacroTable {
        &self.table
    }

    /// The union macro set applicable to a file
    pub fn resolve(&self, file_name: &str) -> MacroSet {
        self.matcher.resolve(file_name)
    }

    /// Forward pass for one file: macro keys become their values
    pub fn expand(&self, file_name: &str, text: &str) -> SubstitutionResult {
        let macros = self.matcher.resolve(file_name);
        SubstitutionEngine::expand(text, &macros)
    }

    /// Reverse pass for one file: replacement values become macro keys again.
    ///
    /// The reverse map is rebuilt from the file's union set on every call
    /// (different files may match different pattern subsets); any value
    /// collisions found while inverting are returned alongside the result.
    pub fn unexpand(&self, file_name: &str, text: &str) -> (SubstitutionResult, Vec<Collision>) {
        let macros = self.matcher.resolve(file_name);
        let (reverse, collisions) = ReverseMacroSet::build(&macros);
        (SubstitutionEngine::unexpand(text, &reverse), collisions)
    }
}
