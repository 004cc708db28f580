use serde::Serialize;

use super::table::MacroSet;

// @module: Reverse map construction with collision detection

/// One value-to-key entry of a reverse map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReverseEntry {
    /// Replacement value to search for in translated text
    pub value: String,

    /// Macro key to restore in its place
    pub key: String,
}

/// Two or more macro keys sharing the same replacement value
///
/// Reversal is ambiguous for such a value: whichever key is restored, the
/// other one is lost. The builder records the collision instead of silently
/// picking a winner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collision {
    /// The shared replacement value
    pub value: String,

    /// Every key mapping to that value, in declaration order
    pub keys: Vec<String>,
}

/// Value-to-key map for the reverse pass
///
/// Built fresh per file from the union macro set applicable to it; entries
/// are kept in first-occurrence order of values and never mutated after
/// construction.
#[derive(Debug, Clone, Default)]
pub struct ReverseMacroSet {
    entries: Vec<ReverseEntry>,
}

impl ReverseMacroSet {
    /// Invert the union macro set for one file.
    ///
    /// Each (key, value) pair becomes (value, key). When two distinct keys
    /// map to the same value, one collision record is produced per value,
    /// naming every colliding key, and the last-declared key wins. That is
    /// the same resolution order as the forward pass, so the common case
    /// where a file only ever contained one of the colliding keys still
    /// reverses consistently. Silent last-wins without the record could
    /// reintroduce an unrelated macro token on reversal with no trace in
    /// the diagnostics.
    pub fn build(macros: &MacroSet) -> (Self, Vec<Collision>) {
        let mut entries: Vec<ReverseEntry> = Vec::with_capacity(macros.len());
        let mut collisions: Vec<Collision> = Vec::new();

        for m in macros.iter() {
            match entries.iter_mut().find(|entry| entry.value == m.value) {
                Some(existing) => {
                    match collisions.iter_mut().find(|c| c.value == m.value) {
                        Some(collision) => collision.keys.push(m.key.clone()),
                        None => collisions.push(Collision {
                            value: m.value.clone(),
                            keys: vec![existing.key.clone(), m.key.clone()],
                        }),
                    }
                    // Last-declared key wins, matching forward resolution.
                    existing.key = m.key.clone();
                }
                None => entries.push(ReverseEntry {
                    value: m.value.clone(),
                    key: m.key.clone(),
                }),
            }
        }

        (Self { entries }, collisions)
    }

    /// Look up the macro key restored for a replacement value
    pub fn get(&self, value: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.value == value)
            .map(|entry| entry.key.as_str())
    }

    /// Iterate entries in first-occurrence order of values
    pub fn iter(&self) -> std::slice::Iter<'_, ReverseEntry> {
        self.entries.iter()
    }

    /// Number of distinct replacement values
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no entries at all
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
