use pretty_assertions::assert_eq;
use serde_json::json;
use switchboard_client::envelope::{normalize_entity, normalize_list};

// ── Paginated collection envelope ────────────────────────────────

#[test]
fn paginated_envelope() {
    let result = normalize_list(json!({
        "data": {
            "docs": [{"_id": "1"}],
            "totalDocs": 5,
            "page": 1,
            "limit": 10,
            "totalPages": 1
        }
    }));
    assert_eq!(result.items, vec![json!({"_id": "1"})]);
    assert_eq!(result.total, 5);
}

#[test]
fn paginated_envelope_missing_total_defaults_to_zero() {
    let result = normalize_list(json!({"data": {"docs": [{"_id": "1"}]}}));
    assert_eq!(result.len(), 1);
    assert_eq!(result.total, 0);
}

#[test]
fn paginated_envelope_non_array_docs_degrades_to_empty() {
    let result = normalize_list(json!({"data": {"docs": "oops", "totalDocs": 3}}));
    assert!(result.is_empty());
    assert_eq!(result.total, 3);
}

// ── Plain array envelope ─────────────────────────────────────────

#[test]
fn plain_array_envelope() {
    let result = normalize_list(json!({"data": [{"_id": "1"}, {"_id": "2"}]}));
    assert_eq!(result.len(), 2);
    assert_eq!(result.total, 2);
}

#[test]
fn empty_array_envelope() {
    let result = normalize_list(json!({"data": []}));
    assert!(result.is_empty());
    assert_eq!(result.total, 0);
}

// ── Single object envelope ───────────────────────────────────────

#[test]
fn single_object_wraps_as_one_element_page() {
    let result = normalize_list(json!({"data": {"_id": "7", "name": "config"}}));
    assert_eq!(result.len(), 1);
    assert_eq!(result.total, 1);
    assert_eq!(result.items[0]["_id"], "7");
}

// ── Malformed envelopes never panic ──────────────────────────────

#[test]
fn null_data_degrades_to_empty() {
    let result = normalize_list(json!({"data": null}));
    assert!(result.is_empty());
    assert_eq!(result.total, 0);
}

#[test]
fn missing_data_degrades_to_empty() {
    assert!(normalize_list(json!({})).is_empty());
    assert!(normalize_list(json!(null)).is_empty());
    assert!(normalize_list(json!("garbage")).is_empty());
    assert!(normalize_list(json!(42)).is_empty());
}

#[test]
fn scalar_data_degrades_to_empty() {
    assert!(normalize_list(json!({"data": "nope"})).is_empty());
    assert!(normalize_list(json!({"data": 12})).is_empty());
    assert!(normalize_list(json!({"data": true})).is_empty());
}

// ── Entity normalization ─────────────────────────────────────────

#[test]
fn entity_envelope() {
    let result = normalize_entity(json!({"data": {"_id": "1", "username": "alice"}}));
    assert!(!result.is_absent());
    assert_eq!(result.item["username"], "alice");
}

#[test]
fn entity_null_data_is_absent() {
    assert!(normalize_entity(json!({"data": null})).is_absent());
    assert!(normalize_entity(json!({})).is_absent());
    assert!(normalize_entity(json!(null)).is_absent());
}

#[test]
fn entity_array_data_passes_through() {
    // Some action endpoints return arrays; callers decode explicitly.
    let result = normalize_entity(json!({"data": [1, 2]}));
    assert!(!result.is_absent());
    assert_eq!(result.item, json!([1, 2]));
}
