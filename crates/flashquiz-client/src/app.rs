//! Application context.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::auth::AuthSession;
use crate::config::ClientConfig;
use crate::csrf::CsrfClient;
use crate::error::ClientError;

/// Everything one running app instance needs to talk to the server.
///
/// The auth session and the API client share one HTTP client, so a login
/// through `session` authenticates the calls made through `api`.
pub struct App {
    pub config: ClientConfig,
    pub session: AuthSession,
    pub api: ApiClient,
}

impl App {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = Arc::new(CsrfClient::new(&config)?);
        Ok(Self {
            session: AuthSession::new(Arc::clone(&http)),
            api: ApiClient::new(http),
            config,
        })
    }

    /// Fetch the CSRF cookie, then hydrate the session.
    pub async fn start(&self) {
        self.session.http().initialize_csrf().await;
        self.session.check_auth().await;
    }

    /// Start, then log in with the configured credentials unless the server
    /// already knows this session. Returns whether a user is logged in.
    pub async fn sign_in(&self) -> bool {
        self.start().await;
        if self.session.is_authenticated() {
            return true;
        }
        match (&self.config.username, &self.config.password) {
            (Some(username), Some(password)) => self.session.login(username, password).await,
            _ => false,
        }
    }
}
