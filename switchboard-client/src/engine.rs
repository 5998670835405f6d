//! The generic resource query engine.
//!
//! Composes transport, query translation and envelope normalization into the
//! CRUD verbs every admin list page uses, plus an escape hatch for action
//! endpoints. All operations are stateless pass-throughs; 401 handling lives
//! entirely in the transport.

use crate::envelope;
use crate::error::ClientResult;
use crate::params;
use crate::transport::TransportClient;
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use switchboard_types::{EntityResult, ListResult, QuerySpec};
use tracing::debug;

/// Generic CRUD engine over named REST collections.
#[derive(Debug, Clone)]
pub struct ResourceQueryEngine {
    transport: Arc<TransportClient>,
}

impl ResourceQueryEngine {
    /// Creates an engine over the given transport.
    pub fn new(transport: Arc<TransportClient>) -> Self {
        Self { transport }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &Arc<TransportClient> {
        &self.transport
    }

    /// Lists a page of a resource.
    pub async fn list(&self, spec: &QuerySpec) -> ClientResult<ListResult> {
        let query = params::query_params(spec);
        let envelope = self
            .transport
            .request(Method::GET, &spec.resource, &query, None)
            .await?;
        let result = envelope::normalize_list(envelope);
        debug!(
            resource = %spec.resource,
            page = spec.page,
            rows = result.len(),
            total = result.total,
            "list resolved"
        );
        Ok(result)
    }

    /// Fetches a single record by id.
    pub async fn get_one(&self, resource: &str, id: &str) -> ClientResult<EntityResult> {
        let envelope = self
            .transport
            .request(Method::GET, &format!("{resource}/{id}"), &[], None)
            .await?;
        Ok(envelope::normalize_entity(envelope))
    }

    /// Creates a record.
    pub async fn create(&self, resource: &str, body: Value) -> ClientResult<EntityResult> {
        let envelope = self
            .transport
            .request(Method::POST, resource, &[], Some(&body))
            .await?;
        Ok(envelope::normalize_entity(envelope))
    }

    /// Updates a record, or — when `id` is absent — PATCHes the bare
    /// collection. The latter is the bulk "ids in body" pattern used for
    /// batch mutations (ban a set of users, delete a set of messages).
    pub async fn update(
        &self,
        resource: &str,
        id: Option<&str>,
        body: Value,
    ) -> ClientResult<EntityResult> {
        let path = match id {
            Some(id) => format!("{resource}/{id}"),
            None => resource.to_string(),
        };
        let envelope = self
            .transport
            .request(Method::PATCH, &path, &[], Some(&body))
            .await?;
        Ok(envelope::normalize_entity(envelope))
    }

    /// Deletes a record.
    pub async fn delete(&self, resource: &str, id: &str) -> ClientResult<EntityResult> {
        let envelope = self
            .transport
            .request(Method::DELETE, &format!("{resource}/{id}"), &[], None)
            .await?;
        Ok(envelope::normalize_entity(envelope))
    }

    /// Applies one patch to a set of records in a single call:
    /// `PATCH <resource>` with `{ "<ids_field>": [...], "updates": {...} }`.
    pub async fn batch_update(
        &self,
        resource: &str,
        ids_field: &str,
        ids: &[String],
        updates: Value,
    ) -> ClientResult<EntityResult> {
        let body = serde_json::json!({ ids_field: ids, "updates": updates });
        self.update(resource, None, body).await
    }

    /// Escape hatch for action endpoints that are not plain CRUD, e.g.
    /// "send notification to all" or "logout all devices".
    pub async fn custom(
        &self,
        method: Method,
        path: &str,
        payload: Option<Value>,
        query: &[(String, String)],
    ) -> ClientResult<EntityResult> {
        let envelope = self
            .transport
            .request(method, path, query, payload.as_ref())
            .await?;
        Ok(envelope::normalize_entity(envelope))
    }
}
