//! The single HTTP client every outbound call goes through.
//!
//! Responsibilities: attach the bearer credential, detect session expiry
//! (HTTP 401) and tear the session down, and map everything else into the
//! error taxonomy. No retries, no backoff — operations are user-initiated
//! and the user retries by re-triggering the action.

use crate::error::{ClientError, ClientResult};
use crate::session::SessionStore;
use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Base URL every resource path is appended to, e.g.
    /// `https://admin.example.com/api`.
    pub api_root: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            api_root: "http://localhost:3000/api".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Wraps one `reqwest::Client` and the session it authenticates with.
#[derive(Debug, Clone)]
pub struct TransportClient {
    config: TransportConfig,
    client: Client,
    session: SessionStore,
}

impl TransportClient {
    /// Creates a transport over the given session.
    pub fn new(config: TransportConfig, session: SessionStore) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            config,
            client,
            session,
        })
    }

    /// The session this transport authenticates with.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// The configured API root.
    pub fn api_root(&self) -> &str {
        &self.config.api_root
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.api_root.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Performs one request and returns the raw JSON envelope.
    ///
    /// A token, when present, rides along as `Authorization: Bearer <token>`;
    /// its absence is not an error here (login itself is unauthenticated).
    /// On 401 the session is destroyed before the error is returned, so by
    /// the time a caller sees [`ClientError::AuthExpired`] every subscribed
    /// view has already been told the session ended.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> ClientResult<Value> {
        let url = self.url(path);
        debug!(%method, %url, "dispatching request");

        let mut request = self.client.request(method, &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = self.session.get().await {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Network(format!("request failed: {e}")))?;

        let status = response.status();
        if status.as_u16() == 401 {
            warn!(%url, "backend rejected credential, ending session");
            self.session.clear().await;
            return Err(ClientError::AuthExpired);
        }

        let text = response
            .text()
            .await
            .map_err(|e| ClientError::Network(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(ClientError::Transport {
                status: status.as_u16(),
                message: extract_message(&text, status.as_u16()),
            });
        }

        if text.is_empty() {
            return Ok(Value::Null);
        }

        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(e) => {
                // A 2xx with an unparseable body degrades like any other
                // unrecognized envelope: the normalizer turns Null into
                // "no rows" instead of crashing the view.
                warn!(%url, "unparseable response body: {e}");
                Ok(Value::Null)
            }
        }
    }
}

/// Pulls the backend's error message out of a failure body, falling back to
/// the raw body, then to a generic text.
fn extract_message(body: &str, status: u16) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(msg) = value.get(key).and_then(Value::as_str) {
                return msg.to_string();
            }
        }
    }
    if body.trim().is_empty() {
        format!("request failed with status {status}")
    } else {
        body.trim().to_string()
    }
}
