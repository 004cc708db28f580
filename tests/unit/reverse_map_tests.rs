/*!
 * Tests for reverse map construction and collision detection
 */

use sqlporter::macros::{MacroSet, ReverseMacroSet, SubstitutionEngine};

fn set_of(pairs: &[(&str, &str)]) -> MacroSet {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Test that distinct values invert one to one
#[test]
fn test_build_withDistinctValues_shouldInvertAll() {
    let macros = set_of(&[("${A}", "alpha"), ("${B}", "beta")]);
    let (reverse, collisions) = ReverseMacroSet::build(&macros);

    assert!(collisions.is_empty());
    assert_eq!(reverse.len(), 2);
    assert_eq!(reverse.get("alpha"), Some("${A}"));
    assert_eq!(reverse.get("beta"), Some("${B}"));
}

/// Test that two keys sharing one value produce exactly one collision record
#[test]
fn test_build_withCollidingValues_shouldReportExactlyOneCollision() {
    let macros = set_of(&[("A", "x"), ("B", "x")]);
    let (reverse, collisions) = ReverseMacroSet::build(&macros);

    assert_eq!(collisions.len(), 1);
    assert_eq!(collisions[0].value, "x");
    assert_eq!(collisions[0].keys, vec!["A".to_string(), "B".to_string()]);

    // The map itself stays usable, with a single entry for the value
    assert_eq!(reverse.len(), 1);
}

/// Test that the last-declared key wins, matching forward resolution
#[test]
fn test_build_withCollision_shouldResolveToLastDeclaredKey() {
    let macros = set_of(&[("A", "x"), ("B", "x")]);
    let (reverse, _collisions) = ReverseMacroSet::build(&macros);

    assert_eq!(reverse.get("x"), Some("B"));
}

/// Test that a three-way collision lists every key in declaration order
#[test]
fn test_build_withThreeWayCollision_shouldListAllKeys() {
    let macros = set_of(&[("A", "x"), ("B", "x"), ("C", "x")]);
    let (reverse, collisions) = ReverseMacroSet::build(&macros);

    assert_eq!(collisions.len(), 1);
    assert_eq!(
        collisions[0].keys,
        vec!["A".to_string(), "B".to_string(), "C".to_string()]
    );
    assert_eq!(reverse.get("x"), Some("C"));
}

/// Test that independent collisions are recorded per value
#[test]
fn test_build_withTwoCollidingValues_shouldRecordOnePerValue() {
    let macros = set_of(&[("A", "x"), ("B", "x"), ("C", "y"), ("D", "y")]);
    let (_reverse, collisions) = ReverseMacroSet::build(&macros);

    assert_eq!(collisions.len(), 2);
    assert_eq!(collisions[0].value, "x");
    assert_eq!(collisions[1].value, "y");
}

/// Test that an empty set builds an empty map
#[test]
fn test_build_withEmptySet_shouldReturnEmptyMap() {
    let (reverse, collisions) = ReverseMacroSet::build(&MacroSet::new());
    assert!(reverse.is_empty());
    assert!(collisions.is_empty());
}

/// Test that entries keep first-occurrence order of values
#[test]
fn test_build_withSeveralValues_shouldKeepFirstOccurrenceOrder() {
    let macros = set_of(&[("${A}", "alpha"), ("${B}", "beta"), ("${C}", "alpha")]);
    let (reverse, collisions) = ReverseMacroSet::build(&macros);

    let values: Vec<&str> = reverse.iter().map(|e| e.value.as_str()).collect();
    assert_eq!(values, vec!["alpha", "beta"]);
    assert_eq!(collisions.len(), 1);
}

/// Test that the forward and reverse passes stay mutually consistent under
/// a collision: a file that only ever contained the winning key round-trips
#[test]
fn test_unexpand_withCollision_shouldRestoreLastDeclaredKey() {
    let macros = set_of(&[("${A}", "x"), ("${B}", "x")]);
    let text = "SELECT ${B} FROM t";

    let forward = SubstitutionEngine::expand(text, &macros);
    assert_eq!(forward.text, "SELECT x FROM t");

    let (reverse, collisions) = ReverseMacroSet::build(&macros);
    assert_eq!(collisions.len(), 1);

    let restored = SubstitutionEngine::unexpand(&forward.text, &reverse);
    assert_eq!(restored.text, text);
}
