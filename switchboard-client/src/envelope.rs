//! Normalization of the backend's response envelopes.
//!
//! The backend is not uniform: three envelope shapes are in the wild.
//!
//! 1. paginated collection — `{ "data": { "docs": [...], "totalDocs": n, ... } }`
//! 2. plain array — `{ "data": [...] }`
//! 3. single object — `{ "data": {...} }`
//!
//! The normalizer classifies all three and degrades anything else to an
//! empty result. It never fails: several endpoints are inconsistent about
//! their envelope and the UI must render "no rows" rather than crash.

use serde_json::Value;
use switchboard_types::{EntityResult, ListResult};
use tracing::warn;

/// Normalizes a raw envelope into a [`ListResult`].
pub fn normalize_list(envelope: Value) -> ListResult {
    let data = match envelope.get("data") {
        Some(data) => data,
        None => {
            warn!("envelope has no data field, degrading to empty list");
            return ListResult::empty();
        }
    };

    // Case 1: paginated collection. A docs key wins even if malformed —
    // a non-array docs degrades to no rows, missing totalDocs to 0.
    if let Some(obj) = data.as_object() {
        if obj.contains_key("docs") {
            let items = obj
                .get("docs")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            let total = obj
                .get("totalDocs")
                .and_then(Value::as_u64)
                .unwrap_or_default();
            return ListResult { items, total };
        }
    }

    // Case 2: plain array, no pagination metadata. The page is its own
    // total — there is no authoritative count to report.
    if let Some(items) = data.as_array() {
        return ListResult {
            total: items.len() as u64,
            items: items.clone(),
        };
    }

    // Case 3: single object, wrapped as a one-element page.
    if data.is_object() {
        return ListResult {
            items: vec![data.clone()],
            total: 1,
        };
    }

    if !data.is_null() {
        warn!("unrecognized list envelope shape, degrading to empty list");
    }
    ListResult::empty()
}

/// Normalizes a raw envelope into an [`EntityResult`].
///
/// Missing or null `data` yields the absent entity, never an error.
pub fn normalize_entity(envelope: Value) -> EntityResult {
    match envelope.get("data") {
        Some(Value::Null) | None => EntityResult::absent(),
        Some(data) => EntityResult::new(data.clone()),
    }
}
