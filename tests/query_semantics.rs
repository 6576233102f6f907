//! Query Semantics Tests
//!
//! Filters, projection and their composition over a loaded collection:
//! - Filters compose as AND, independent of call order
//! - Unresolvable paths and non-list fields exclude, never error
//! - Projection keeps only selected paths and their ancestors

use quilldb::{Filter, Store};
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

// =============================================================================
// Test Utilities
// =============================================================================

fn store_with(collection: &str, contents: Value) -> (TempDir, Store) {
    let temp = TempDir::new().expect("Failed to create temp dir");
    fs::write(
        temp.path().join(format!("{}.json", collection)),
        serde_json::to_string(&contents).unwrap(),
    )
    .unwrap();
    let store = Store::local(temp.path());
    (temp, store)
}

fn contacts() -> (TempDir, Store) {
    store_with(
        "contacts",
        json!([
            {"name": "Ann", "tags": ["x", "y"]},
            {"name": "Bo", "tags": ["x"]}
        ]),
    )
}

fn people() -> (TempDir, Store) {
    store_with(
        "people",
        json!([
            {"name": "Ann", "age": 34, "address": {"city": "Oslo", "zip": "0150"}, "tags": ["admin", "ops"]},
            {"name": "Bo", "age": 19, "address": {"city": "Rome"}, "tags": []},
            {"name": "Cy", "age": 52, "address": null, "tags": "ops"},
            {"name": "Di", "age": 27, "nick": "dee"}
        ]),
    )
}

fn keys(rows: &quilldb::RecordSet) -> Vec<String> {
    rows.keys().cloned().collect()
}

// =============================================================================
// Reference scenario
// =============================================================================

#[test]
fn test_equals_then_full_projection() {
    let (_temp, store) = contacts();

    let rows = store.from("contacts").unwrap().equals("name", "Ann").rows();

    assert_eq!(
        serde_json::to_value(&rows).unwrap(),
        json!({"0": {"name": "Ann", "tags": ["x", "y"]}})
    );
}

#[test]
fn test_containment_selects_members() {
    let (_temp, store) = contacts();

    let only_y = store.from("contacts").unwrap().contains("tags", "y").rows();
    assert_eq!(keys(&only_y), vec!["0"]);

    let with_x = store.from("contacts").unwrap().contains("tags", "x").rows();
    assert_eq!(keys(&with_x), vec!["0", "1"]);
}

#[test]
fn test_cardinality_filter() {
    let (_temp, store) = contacts();

    let rows = store.from("contacts").unwrap().count("tags", ">", 1).rows();
    assert_eq!(keys(&rows), vec!["0"]);

    let rows = store.from("contacts").unwrap().count_equals("tags", 1).rows();
    assert_eq!(keys(&rows), vec!["1"]);
}

// =============================================================================
// Composition
// =============================================================================

#[test]
fn test_filters_compose_as_and_in_any_order() {
    let (_temp, store) = people();

    let a = store
        .from("people")
        .unwrap()
        .compare("age", ">=", 20)
        .exists("address")
        .rows();
    let b = store
        .from("people")
        .unwrap()
        .exists("address")
        .compare("age", ">=", 20)
        .rows();

    assert_eq!(a, b);
    assert_eq!(keys(&a), vec!["0"]);
}

#[test]
fn test_generic_filter_matches_named_methods() {
    let (_temp, store) = people();

    let named = store.from("people").unwrap().compare("age", "<", 30).rows();
    let generic = store
        .from("people")
        .unwrap()
        .filter(Filter::compare("age", "<", 30))
        .rows();

    assert_eq!(named, generic);
    assert_eq!(keys(&named), vec!["1", "3"]);
}

#[test]
fn test_filter_that_empties_stays_empty() {
    let (_temp, store) = people();

    let session = store
        .from("people")
        .unwrap()
        .equals("name", "Nobody")
        .compare("age", ">", 0);

    assert!(session.is_empty());
    assert!(session.rows().is_empty());
}

// =============================================================================
// Predicate edge cases
// =============================================================================

#[test]
fn test_present_on_nested_path() {
    let (_temp, store) = people();

    let rows = store.from("people").unwrap().present("address.city").rows();
    assert_eq!(keys(&rows), vec!["0", "1"]);
}

#[test]
fn test_nested_equality_fails_closed_on_null_parent() {
    let (_temp, store) = people();

    let rows = store
        .from("people")
        .unwrap()
        .compare("address.city", "!=", "Oslo")
        .rows();

    // Cy has a null address and Di none at all: both excluded, not matched
    assert_eq!(keys(&rows), vec!["1"]);
}

#[test]
fn test_like_substring() {
    let (_temp, store) = people();

    let rows = store.from("people").unwrap().compare("name", "like", "n").rows();
    assert_eq!(keys(&rows), vec!["0"]);

    let rows = store.from("people").unwrap().compare("name", "LIKE", "N").rows();
    assert!(rows.is_empty());
}

#[test]
fn test_unsupported_operator_matches_nothing() {
    let (_temp, store) = people();

    let session = store.from("people").unwrap().compare("age", "<>", 19);
    assert!(session.is_filtered());
    assert!(session.is_empty());
}

#[test]
fn test_not_exists_is_top_level() {
    let (_temp, store) = people();

    let rows = store.from("people").unwrap().not_exists("nick").rows();
    assert_eq!(keys(&rows), vec!["0", "1", "2"]);

    // dotted names are literal top-level keys for existence
    let rows = store.from("people").unwrap().exists("address.city").rows();
    assert!(rows.is_empty());
}

#[test]
fn test_contains_on_non_list_excludes() {
    let (_temp, store) = people();

    let rows = store.from("people").unwrap().contains("tags", "ops").rows();
    assert_eq!(keys(&rows), vec!["0"]);

    let rows = store.from("people").unwrap().not_contains("tags", "ops").rows();
    assert_eq!(keys(&rows), vec!["1"]);
}

#[test]
fn test_is_list() {
    let (_temp, store) = people();

    let rows = store.from("people").unwrap().is_list("tags").rows();
    assert_eq!(keys(&rows), vec!["0", "1"]);
}

// =============================================================================
// Projection
// =============================================================================

#[test]
fn test_select_nested_path_omits_siblings() {
    let (_temp, store) = people();

    let rows = store
        .from("people")
        .unwrap()
        .select(["address.city"])
        .rows();

    assert_eq!(
        serde_json::to_value(&rows).unwrap(),
        json!({
            "0": {"address": {"city": "Oslo"}},
            "1": {"address": {"city": "Rome"}}
        })
    );
}

#[test]
fn test_select_multiple_paths_per_record_subsets() {
    let (_temp, store) = people();

    let rows = store
        .from("people")
        .unwrap()
        .select(["nick", "address.zip"])
        .rows();

    assert_eq!(
        serde_json::to_value(&rows).unwrap(),
        json!({
            "0": {"address": {"zip": "0150"}},
            "3": {"nick": "dee"}
        })
    );
}

#[test]
fn test_wildcard_returns_full_records() {
    let (_temp, store) = contacts();

    let session = store.from("contacts").unwrap().select(["name", "*"]);
    assert!(session.selection().is_all());
    assert_eq!(session.rows()["1"]["tags"], json!(["x"]));
}

#[test]
fn test_projection_is_repeatable() {
    let (_temp, store) = people();

    let session = store.from("people").unwrap().compare("age", ">", 30).select(["name"]);
    let first = session.rows();
    let second = session.rows();

    assert_eq!(first, second);
    assert_eq!(session.len(), 2);
}

#[test]
fn test_get_by_key_within_working_set() {
    let (_temp, store) = contacts();

    let session = store.from("contacts").unwrap().equals("name", "Bo");
    assert_eq!(session.get("1").map(|r| r["name"].clone()), Some(json!("Bo")));
    assert!(session.get("0").is_none());
}
