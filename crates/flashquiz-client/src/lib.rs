//! flashquiz-client — HTTP client for the flashquiz API.
//!
//! Wraps every request with the session cookie and CSRF token, keeps the
//! authenticated-user session, and exposes the card, label and user search
//! endpoints. [`App`] bundles them into one application context.

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod csrf;
pub mod error;
pub mod memory;

pub use api::ApiClient;
pub use app::App;
pub use auth::{AuthSession, SessionState};
pub use config::{load_config, ClientConfig};
pub use csrf::{csrf_token_from_cookies, CsrfClient, RequestOptions};
pub use error::ClientError;
pub use memory::InMemoryRepository;
