//! Core type definitions for the Switchboard admin data-access layer.
//!
//! This crate defines the resource-agnostic types the query engine and the
//! view controllers exchange:
//! - `QuerySpec` — abstract description of a list request (pagination +
//!   filters + sort)
//! - `ListResult` / `EntityResult` — uniform decoded results
//!
//! Entities are deliberately opaque (`serde_json::Value`): the engine has no
//! schema awareness beyond "a resource is a named REST collection". Typed
//! decoding is an explicit step via `decode`.

mod query;
mod result;

pub use query::{Filter, FilterValue, QuerySpec, Sort, SortOrder, DEFAULT_PAGE_SIZE};
pub use result::{EntityResult, ListResult};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}
