use std::fs;
use std::path::Path;
use std::slice;

use serde_yaml::Value;

use crate::errors::ConfigError;

// @module: Macro map data model and YAML loader

/// A single macro definition: a literal token and its replacement value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Macro {
    /// The literal token as it appears in source SQL, e.g. `${MACRO_1}`
    pub key: String,

    /// The concrete value written in its place before translation
    pub value: String,
}

/// Ordered set of macros scoped to one file pattern
///
/// Insertion order is kept because the forward pass applies macros in
/// declaration order; keys are unique within one set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacroSet {
    entries: Vec<Macro>,
}

impl MacroSet {
    /// Create an empty macro set
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the replacement value for a macro key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|m| m.key == key)
            .map(|m| m.value.as_str())
    }

    /// Append a macro, or replace the value in place if the key is already
    /// present. The key keeps the position of its first declaration, so an
    /// ordered merge over several sets stays deterministic while the
    /// last-declared value wins.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|m| m.key == key) {
            Some(existing) => existing.value = value,
            None => self.entries.push(Macro { key, value }),
        }
    }

    /// Iterate macros in declaration order
    pub fn iter(&self) -> slice::Iter<'_, Macro> {
        self.entries.iter()
    }

    /// Macro keys in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|m| m.key.as_str())
    }

    /// Number of macros in the set
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set holds no macros at all
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a MacroSet {
    type Item = &'a Macro;
    type IntoIter = slice::Iter<'a, Macro>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<(String, String)> for MacroSet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut set = MacroSet::new();
        for (key, value) in iter {
            set.insert(key, value);
        }
        set
    }
}

/// Immutable table of pattern-scoped macro sets, in declaration order
///
/// Built once from the macro map document and never mutated afterwards;
/// concurrent readers need no coordination.
#[derive(Debug, Clone, Default)]
pub struct MacroTable {
    entries: Vec<(String, MacroSet)>,
}

impl MacroTable {
    /// Create an empty table (no macro processing configured)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a macro map document from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let document = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&document)
    }

    /// Parse a macro map document of the shape:
    ///
    /// ```yaml
    /// macros:
    ///   '*.sql':
    ///     '${MACRO_1}': 'my_table'
    ///   '2.sql':
    ///     'templated_column': 'replacing_column'
    /// ```
    ///
    /// Document order of patterns and of the macros under each pattern is
    /// preserved; it drives forward-pass application order and conflict
    /// resolution, which is why the mapping is walked as a raw
    /// [`serde_yaml::Value`] instead of being deserialized into a hash map.
    pub fn from_yaml_str(document: &str) -> Result<Self, ConfigError> {
        let root: Value = serde_yaml::from_str(document)?;
        let Value::Mapping(root) = root else {
            return Err(ConfigError::MissingMacros);
        };
        let macros_value = root.iter().find_map(|(key, value)| match key {
            Value::String(name) if name == "macros" => Some(value),
            _ => None,
        });
        let Some(Value::Mapping(patterns)) = macros_value else {
            return Err(ConfigError::MissingMacros);
        };

        let mut entries: Vec<(String, MacroSet)> = Vec::with_capacity(patterns.len());
        for (pattern_key, set_value) in patterns {
            let Value::String(pattern) = pattern_key else {
                return Err(ConfigError::InvalidPattern(format!("{:?}", pattern_key)));
            };
            if entries.iter().any(|(existing, _)| existing == pattern) {
                return Err(ConfigError::DuplicatePattern(pattern.clone()));
            }

            let Value::Mapping(pairs) = set_value else {
                return Err(ConfigError::InvalidMacroSet(pattern.clone()));
            };
            let mut set = MacroSet::new();
            for (key, value) in pairs {
                let (Value::String(key), Value::String(value)) = (key, value) else {
                    return Err(ConfigError::InvalidMacroSet(pattern.clone()));
                };
                if set.get(key).is_some() {
                    return Err(ConfigError::DuplicateKey {
                        pattern: pattern.clone(),
                        key: key.clone(),
                    });
                }
                set.insert(key.clone(), value.clone());
            }
            entries.push((pattern.clone(), set));
        }

        Ok(Self { entries })
    }

    /// Look up the macro set declared under an exact pattern string
    pub fn get(&self, pattern: &str) -> Option<&MacroSet> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == pattern)
            .map(|(_, set)| set)
    }

    /// Iterate (pattern, macro set) pairs in declaration order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &MacroSet)> {
        self.entries.iter().map(|(p, s)| (p.as_str(), s))
    }

    /// File patterns in declaration order
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(p, _)| p.as_str())
    }

    /// Number of pattern entries in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no pattern entries at all
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
