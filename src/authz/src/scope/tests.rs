/// Test suite for scope handling
///
/// Tests cover:
/// - Parsing and serde representation
/// - Set semantics of presented scopes

use super::*;
use std::str::FromStr;

// ============================================================================
// Scope Type Tests
// ============================================================================

#[test]
fn test_scope_parsing() {
    let scope = Scope::from_str("scope_bor").unwrap();
    assert_eq!(scope.as_str(), "scope_bor");
}

#[test]
fn test_scope_is_opaque() {
    // Colons and wildcards carry no meaning
    let scope = Scope::new("org:*").unwrap();
    assert_ne!(scope, Scope::from("org:acme"));
    assert_eq!(scope, Scope::from("org:*"));
}

#[test]
fn test_scope_serde_transparent() {
    let scope = Scope::from("scope_dadi");
    assert_eq!(serde_json::to_string(&scope).unwrap(), "\"scope_dadi\"");

    let parsed: Scope = serde_json::from_str("\"scope_dadi\"").unwrap();
    assert_eq!(parsed, scope);
}

// ============================================================================
// Presented Scope Set Tests
// ============================================================================

#[test]
fn test_empty_presented_scopes() {
    let scopes = Scopes::new();
    assert!(scopes.is_empty());
    assert!(!scopes.contains(&Scope::from("anything")));
}

#[test]
fn test_presented_scopes_from_json_list() {
    let scopes: Scopes = serde_json::from_str(r#"["scope_a", "scope_b", "scope_a"]"#).unwrap();
    assert_eq!(scopes.len(), 2);
}

#[test]
fn test_insert_reports_new_scope() {
    let mut scopes = Scopes::new();
    assert!(scopes.insert("scope_a"));
    assert!(!scopes.insert(String::from("scope_a")));
    assert_eq!(scopes.iter().count(), 1);
}
