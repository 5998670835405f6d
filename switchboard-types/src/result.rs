//! Uniform decoded results.
//!
//! The backend wraps payloads in several incompatible envelopes; the client
//! crate normalizes all of them into these two shapes before anything else
//! sees them.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A decoded page of a resource listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListResult {
    /// The rows of the requested page.
    pub items: Vec<Value>,
    /// Total row count across all pages, not just this one.
    pub total: u64,
}

impl ListResult {
    /// The empty listing — what malformed envelopes degrade to.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Decodes every item into a typed record.
    pub fn decode<T: DeserializeOwned>(&self) -> crate::Result<Vec<T>> {
        self.items
            .iter()
            .map(|item| serde_json::from_value(item.clone()).map_err(Into::into))
            .collect()
    }
}

/// A single decoded domain record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityResult {
    /// The record, or `Value::Null` when the backend returned nothing usable.
    pub item: Value,
}

impl EntityResult {
    pub fn new(item: Value) -> Self {
        Self { item }
    }

    /// The absent entity — what malformed envelopes degrade to.
    pub fn absent() -> Self {
        Self { item: Value::Null }
    }

    pub fn is_absent(&self) -> bool {
        self.item.is_null()
    }

    /// Decodes the item into a typed record.
    pub fn decode<T: DeserializeOwned>(&self) -> crate::Result<T> {
        serde_json::from_value(self.item.clone()).map_err(Into::into)
    }
}
