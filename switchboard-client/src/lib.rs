//! REST data-access core for the Switchboard admin console.
//!
//! One engine replaces the per-page fetch logic every list view used to
//! carry. The pieces, leaf-first:
//!
//! - **`session`**: holds the bearer credential, persists it across restarts,
//!   and broadcasts session lifecycle events to subscribed views
//! - **`transport`**: the single HTTP client every call goes through; injects
//!   the credential and turns HTTP 401 into a terminal session teardown
//! - **`params`**: translates an abstract [`QuerySpec`] into the backend's
//!   query parameters
//! - **`envelope`**: normalizes the backend's three response envelope shapes
//!   into uniform [`ListResult`]/[`EntityResult`] values
//! - **`engine`**: composes the above into the CRUD verbs plus a `custom`
//!   escape hatch and the bulk ids-in-body update pattern
//! - **`auth`**: admin login/logout against the backend
//!
//! [`QuerySpec`]: switchboard_types::QuerySpec
//! [`ListResult`]: switchboard_types::ListResult
//! [`EntityResult`]: switchboard_types::EntityResult

pub mod auth;
pub mod envelope;
pub mod params;

mod engine;
mod error;
mod session;
mod transport;

pub use auth::Credentials;
pub use engine::ResourceQueryEngine;
pub use error::{ClientError, ClientResult};
pub use session::{SessionEvent, SessionStore, SESSION_FILE_NAME};
pub use transport::{TransportClient, TransportConfig};
