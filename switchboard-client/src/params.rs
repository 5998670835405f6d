//! Translation of an abstract [`QuerySpec`] into backend query parameters.
//!
//! The backend expects one value per key: list filters are comma-joined
//! rather than repeated, and the single active sort is a JSON object mapping
//! the field to `1` or `-1`, serialized into one `sort` parameter.

use switchboard_types::QuerySpec;

/// Builds the flat parameter list for a list request.
///
/// Absent filters and sorters are omitted entirely, never sent as empty
/// values. Only the first sorter is honored — the backend accepts a single
/// active sort.
pub fn query_params(spec: &QuerySpec) -> Vec<(String, String)> {
    let mut params = Vec::with_capacity(2 + spec.filters.len() + 1);
    params.push(("page".to_string(), spec.page.to_string()));
    params.push(("limit".to_string(), spec.page_size.to_string()));

    for filter in &spec.filters {
        if filter.value.is_blank() {
            continue;
        }
        params.push((filter.field.clone(), filter.value.encode()));
    }

    if let Some(sort) = spec.sorters.first() {
        let encoded = serde_json::json!({ &sort.field: sort.order.as_i8() });
        params.push(("sort".to_string(), encoded.to_string()));
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchboard_types::{FilterValue, Sort};

    fn value_of<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn pagination_always_present() {
        let spec = QuerySpec::new("admin/rooms").page(3).page_size(50);
        let params = query_params(&spec);
        assert_eq!(value_of(&params, "page"), Some("3"));
        assert_eq!(value_of(&params, "limit"), Some("50"));
    }

    #[test]
    fn list_filter_is_comma_joined() {
        let spec = QuerySpec::new("admin/messages").filter(
            "roomIds",
            FilterValue::List(vec!["x".to_string(), "y".to_string()]),
        );
        let params = query_params(&spec);
        assert_eq!(value_of(&params, "roomIds"), Some("x,y"));
    }

    #[test]
    fn sort_encodes_as_json_object() {
        let spec = QuerySpec::new("admin/users").sort(Sort::desc("createdAt"));
        let params = query_params(&spec);
        assert_eq!(value_of(&params, "sort"), Some(r#"{"createdAt":-1}"#));

        let spec = QuerySpec::new("admin/users").sort(Sort::asc("createdAt"));
        let params = query_params(&spec);
        assert_eq!(value_of(&params, "sort"), Some(r#"{"createdAt":1}"#));
    }

    #[test]
    fn only_first_sorter_is_sent() {
        let spec = QuerySpec::new("admin/users")
            .sort(Sort::asc("name"))
            .sort(Sort::desc("createdAt"));
        let params = query_params(&spec);
        assert_eq!(value_of(&params, "sort"), Some(r#"{"name":1}"#));
        assert_eq!(params.iter().filter(|(k, _)| k == "sort").count(), 1);
    }

    #[test]
    fn no_sort_key_without_sorters() {
        let params = query_params(&QuerySpec::new("admin/users"));
        assert_eq!(value_of(&params, "sort"), None);
    }
}
