use super::reverse::ReverseMacroSet;
use super::table::MacroSet;

// @module: Forward and reverse literal substitution passes

/// One replacement actually performed during a pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    /// Macro key (the original literal token)
    pub key: String,

    /// Replacement value written into the text
    pub value: String,

    /// Byte offset of the match in the text as scanned by this key's pass.
    /// Passes chain, so an earlier key's insertions shift the offsets seen
    /// by later keys; offsets are deterministic but relative to that
    /// intermediate text, not to the untouched input.
    pub offset: usize,
}

/// Outcome of a substitution pass over one file: the transformed text plus
/// a record of every replacement made
#[derive(Debug, Clone, Default)]
pub struct SubstitutionResult {
    /// Transformed file text
    pub text: String,

    /// Application records, in the order replacements were performed
    pub replacements: Vec<Replacement>,
}

impl SubstitutionResult {
    /// Total number of replacements performed
    pub fn total(&self) -> usize {
        self.replacements.len()
    }

    /// Number of replacements performed for one macro key
    pub fn count_for_key(&self, key: &str) -> usize {
        self.replacements.iter().filter(|r| r.key == key).count()
    }

    /// Keys of the given set that produced zero replacements.
    ///
    /// Not an error, but worth reporting: a macro that never fires usually
    /// means the map is stale.
    pub fn unused_keys(&self, macros: &MacroSet) -> Vec<String> {
        macros
            .keys()
            .filter(|key| self.count_for_key(key) == 0)
            .map(|key| key.to_string())
            .collect()
    }
}

/// Stateless engine for the forward and reverse passes
///
/// Both passes are pure functions of their inputs; the engine holds no
/// state, so per-file passes can run on any number of tasks concurrently.
pub struct SubstitutionEngine;

impl SubstitutionEngine {
    /// Forward pass: replace every non-overlapping literal occurrence of
    /// each macro key with its value.
    ///
    /// Keys are processed in declaration order of the resolved set.
    /// Matching is pure literal substring search, with no token awareness:
    /// a key that happens to be a substring of a longer identifier still
    /// matches. Macros are expected to be full unique tokens like
    /// `${MACRO_1}`, which makes that a non-issue in practice.
    ///
    /// When one macro's value contains another macro's key, only keys
    /// processed later in the order will see it. The ordering is part of
    /// the contract, not an accident.
    pub fn expand(text: &str, macros: &MacroSet) -> SubstitutionResult {
        let mut current = text.to_string();
        let mut replacements = Vec::new();
        for m in macros.iter() {
            // An empty key matches everywhere and would never terminate.
            if m.key.is_empty() {
                continue;
            }
            let (next, offsets) = replace_all(&current, &m.key, &m.value);
            replacements.extend(offsets.into_iter().map(|offset| Replacement {
                key: m.key.clone(),
                value: m.value.clone(),
                offset,
            }));
            current = next;
        }
        SubstitutionResult {
            text: current,
            replacements,
        }
    }

    /// Reverse pass: replace every literal occurrence of each mapped value
    /// with the macro key it resolves to.
    ///
    /// This is best-effort textual reversal. If the translation engine
    /// rewrote a substituted literal (case-folded an identifier, say) or
    /// duplicated it, the original text will not come back exactly; that is
    /// accepted behavior, since the engine is opaque.
    pub fn unexpand(text: &str, reverse: &ReverseMacroSet) -> SubstitutionResult {
        let mut current = text.to_string();
        let mut replacements = Vec::new();
        for entry in reverse.iter() {
            if entry.value.is_empty() {
                continue;
            }
            let (next, offsets) = replace_all(&current, &entry.value, &entry.key);
            replacements.extend(offsets.into_iter().map(|offset| Replacement {
                key: entry.key.clone(),
                value: entry.value.clone(),
                offset,
            }));
            current = next;
        }
        SubstitutionResult {
            text: current,
            replacements,
        }
    }
}

/// Replace every non-overlapping occurrence of `needle` in `haystack` with
/// `replacement`, left to right, returning the new text and the byte offset
/// of each match in `haystack`
fn replace_all(haystack: &str, needle: &str, replacement: &str) -> (String, Vec<usize>) {
    let mut out = String::with_capacity(haystack.len());
    let mut offsets = Vec::new();
    let mut rest = 0;
    while let Some(found) = haystack[rest..].find(needle) {
        let at = rest + found;
        out.push_str(&haystack[rest..at]);
        out.push_str(replacement);
        offsets.push(at);
        rest = at + needle.len();
    }
    out.push_str(&haystack[rest..]);
    (out, offsets)
}
