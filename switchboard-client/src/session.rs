//! Session credential store.
//!
//! Holds the bearer token for the current admin session. The store is the
//! only writable reference to the credential; the transport reads it on
//! every call. Expiry is discovered reactively (a 401 from the backend),
//! never via a client-side timer.

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, warn};

/// Fixed file name the token persists under inside the storage directory.
pub const SESSION_FILE_NAME: &str = "switchboard-session.token";

/// Session lifecycle events broadcast to subscribed views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A token was stored (login succeeded).
    Started,
    /// The token was destroyed (logout, or the backend rejected it).
    Ended,
}

/// Holds the bearer credential and its persistence.
///
/// Cheap to clone; clones share the same token and event channel. Writes are
/// atomic replace-or-clear, never partial, so readers need no coordination
/// beyond the lock.
#[derive(Clone)]
pub struct SessionStore {
    token: Arc<RwLock<Option<String>>>,
    path: Option<PathBuf>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionStore {
    /// Creates an in-memory store (nothing survives a restart).
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            token: Arc::new(RwLock::new(None)),
            path: None,
            events,
        }
    }

    /// Creates a store persisted under `dir`, loading any token a previous
    /// session left behind.
    pub fn with_storage_dir(dir: impl Into<PathBuf>) -> Self {
        let path = dir.into().join(SESSION_FILE_NAME);
        let token = match std::fs::read_to_string(&path) {
            Ok(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    debug!("restored session token from {}", path.display());
                    Some(trimmed.to_string())
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("failed to read session file {}: {e}", path.display());
                None
            }
        };

        let (events, _) = broadcast::channel(16);
        Self {
            token: Arc::new(RwLock::new(token)),
            path: Some(path),
            events,
        }
    }

    /// Returns the current token, if any.
    pub async fn get(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    /// Returns whether a token is held.
    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// Stores a new token, persisting it and notifying subscribers.
    pub async fn set(&self, token: impl Into<String>) {
        let token = token.into();
        if let Some(path) = &self.path {
            // Persistence failures are logged, not surfaced — the session
            // still works for the lifetime of the process.
            if let Some(parent) = path.parent() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    warn!("failed to create session dir {}: {e}", parent.display());
                }
            }
            if let Err(e) = std::fs::write(path, &token) {
                warn!("failed to persist session token: {e}");
            }
        }
        *self.token.write().await = Some(token);
        let _ = self.events.send(SessionEvent::Started);
    }

    /// Destroys the session: removes the token from memory and disk and
    /// notifies subscribers. A no-op when no token is held.
    pub async fn clear(&self) {
        let had_token = self.token.write().await.take().is_some();
        if !had_token {
            return;
        }
        if let Some(path) = &self.path {
            if let Err(e) = std::fs::remove_file(path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!("failed to remove session file: {e}");
                }
            }
        }
        let _ = self.events.send(SessionEvent::Ended);
    }

    /// Subscribes to session lifecycle events. Views listen for
    /// [`SessionEvent::Ended`] to navigate back to the login route.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
