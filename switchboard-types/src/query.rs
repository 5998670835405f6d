//! Abstract list-request description.
//!
//! A `QuerySpec` captures pagination, filters and sort order for one list
//! call without knowing anything about the backend's parameter names. The
//! translation into concrete query parameters lives in the client crate.

use serde::{Deserialize, Serialize};

/// Page size used when a spec doesn't set one explicitly.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A single filter value.
///
/// A scalar variant is an equality filter; `List` is a membership filter
/// (the backend receives the values joined into one comma-separated string).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<String>),
}

impl FilterValue {
    /// Returns true for values that are equivalent to "not set" and must
    /// never be materialized into a spec: the empty string and the empty list.
    pub fn is_blank(&self) -> bool {
        match self {
            FilterValue::Str(s) => s.is_empty(),
            FilterValue::List(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Encodes the value the way the backend expects it: one string per key,
    /// lists comma-joined in their original order.
    pub fn encode(&self) -> String {
        match self {
            FilterValue::Bool(b) => b.to_string(),
            FilterValue::Int(n) => n.to_string(),
            FilterValue::Str(s) => s.clone(),
            FilterValue::List(items) => items.join(","),
        }
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        FilterValue::Bool(v)
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        FilterValue::Int(v)
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        FilterValue::Str(v.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        FilterValue::Str(v)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(v: Vec<String>) -> Self {
        FilterValue::List(v)
    }
}

/// One field filter in a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub field: String,
    pub value: FilterValue,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Backend encoding: `1` ascending, `-1` descending.
    pub fn as_i8(self) -> i8 {
        match self {
            SortOrder::Asc => 1,
            SortOrder::Desc => -1,
        }
    }
}

/// One sort criterion. The backend honors at most one active sort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sort {
    pub field: String,
    pub order: SortOrder,
}

impl Sort {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Desc,
        }
    }
}

/// Abstract, resource-agnostic description of one list request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySpec {
    /// REST collection path, e.g. `admin/users`.
    pub resource: String,
    /// 1-based page number.
    pub page: u32,
    /// Rows per page.
    pub page_size: u32,
    /// Active filters, in application order.
    pub filters: Vec<Filter>,
    /// Sort criteria; only the first is sent to the backend.
    pub sorters: Vec<Sort>,
}

impl QuerySpec {
    /// Creates a spec for the first page of a resource with no filters.
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            filters: Vec::new(),
            sorters: Vec::new(),
        }
    }

    /// Sets the page number (clamped to >= 1).
    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Sets the page size (clamped to >= 1).
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = size.max(1);
        self
    }

    /// Adds a filter. Blank values (empty string, empty list) are dropped —
    /// "not set" never reaches the wire.
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        let value = value.into();
        if !value.is_blank() {
            self.filters.push(Filter {
                field: field.into(),
                value,
            });
        }
        self
    }

    /// Adds a sort criterion.
    pub fn sort(mut self, sort: Sort) -> Self {
        self.sorters.push(sort);
        self
    }
}
