//! Admin login and logout.

use crate::error::{ClientError, ClientResult};
use crate::transport::TransportClient;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Admin credentials for the login call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Logs in against `auth/login`, stores the returned token in the session
/// and returns it. The call itself rides unauthenticated.
pub async fn login(transport: &TransportClient, credentials: &Credentials) -> ClientResult<String> {
    let body = serde_json::to_value(credentials)?;
    let envelope = transport
        .request(Method::POST, "auth/login", &[], Some(&body))
        .await?;

    let token = envelope
        .get("data")
        .and_then(|data| data.get("token"))
        .and_then(Value::as_str)
        .ok_or_else(|| ClientError::Transport {
            status: 200,
            message: "login response carried no token".to_string(),
        })?
        .to_string();

    transport.session().set(token.clone()).await;
    info!("admin login succeeded");
    Ok(token)
}

/// Logs out: tells the backend (best effort) and destroys the session
/// either way.
pub async fn logout(transport: &TransportClient) -> ClientResult<()> {
    let result = transport
        .request(Method::POST, "auth/logout", &[], None)
        .await;
    transport.session().clear().await;
    match result {
        // The backend may have already invalidated the token; the local
        // session is gone regardless, which is what logout means.
        Ok(_) | Err(ClientError::AuthExpired) => {
            info!("admin logout");
            Ok(())
        }
        Err(e) => Err(e),
    }
}
