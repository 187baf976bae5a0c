//! Authentication session.
//!
//! [`AuthSession`] owns the current user and the loading flag. It is created
//! once per application context and handed to whatever needs it; the only
//! way to change its state is through `login`, `register`, `logout` and
//! `check_auth`. Failures are logged and turned into return values, never
//! raised.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use flashquiz_core::model::User;
use flashquiz_core::routes::{guard, Navigation, Route};

use crate::csrf::{CsrfClient, RequestOptions};
use crate::error::ClientError;

pub const LOGIN_PATH: &str = "/api/auth/login/";
pub const REGISTER_PATH: &str = "/api/auth/register/";
pub const LOGOUT_PATH: &str = "/api/auth/logout/";
pub const CHECK_PATH: &str = "/api/auth/check/";

/// Snapshot of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub current_user: Option<User>,
    pub is_loading: bool,
}

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
}

#[derive(Deserialize)]
struct AuthPayload {
    #[serde(default)]
    authenticated: bool,
    #[serde(default)]
    user: Option<User>,
}

/// Sets `is_loading` for as long as it lives.
struct LoadingGuard<'a> {
    state: &'a Mutex<SessionState>,
}

impl<'a> LoadingGuard<'a> {
    fn start(state: &'a Mutex<SessionState>) -> Self {
        lock(state).is_loading = true;
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        lock(self.state).is_loading = false;
    }
}

fn lock(state: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// The authenticated-user session of one application instance.
pub struct AuthSession {
    http: Arc<CsrfClient>,
    state: Mutex<SessionState>,
}

impl AuthSession {
    pub fn new(http: Arc<CsrfClient>) -> Self {
        Self {
            http,
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn http(&self) -> &Arc<CsrfClient> {
        &self.http
    }

    pub fn state(&self) -> SessionState {
        lock(&self.state).clone()
    }

    pub fn current_user(&self) -> Option<User> {
        lock(&self.state).current_user.clone()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).is_loading
    }

    pub fn is_authenticated(&self) -> bool {
        lock(&self.state).current_user.is_some()
    }

    fn set_user(&self, user: Option<User>) {
        lock(&self.state).current_user = user;
    }

    /// Log in. Returns `true` and stores the user on success.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> bool {
        let _loading = LoadingGuard::start(&self.state);
        let credentials = Credentials {
            username,
            password,
            email: None,
        };
        match self.submit_credentials(LOGIN_PATH, &credentials).await {
            Ok(user) => {
                info!(user_id = user.id, "logged in");
                self.set_user(Some(user));
                true
            }
            Err(e) => {
                error!(error = %e, "login failed");
                false
            }
        }
    }

    /// Create an account and log into it. `email` may be empty.
    #[instrument(skip(self, password))]
    pub async fn register(&self, username: &str, password: &str, email: &str) -> bool {
        let _loading = LoadingGuard::start(&self.state);
        let credentials = Credentials {
            username,
            password,
            email: Some(email),
        };
        match self.submit_credentials(REGISTER_PATH, &credentials).await {
            Ok(user) => {
                info!(user_id = user.id, "registered");
                self.set_user(Some(user));
                true
            }
            Err(e) => {
                error!(error = %e, "registration failed");
                false
            }
        }
    }

    /// Log out. The local user is cleared whatever the server answers.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        let _loading = LoadingGuard::start(&self.state);
        match self.http.request_with(LOGOUT_PATH, RequestOptions::post()).await {
            Ok(response) if response.status().is_success() => debug!("logged out"),
            Ok(response) => warn!(status = response.status().as_u16(), "logout rejected"),
            Err(e) => error!(error = %e, "logout error"),
        }
        self.set_user(None);
    }

    /// Hydrate the session from the server. Only ever sets the user; a failed
    /// or negative check leaves the current state alone.
    #[instrument(skip(self))]
    pub async fn check_auth(&self) {
        let _loading = LoadingGuard::start(&self.state);
        match self.fetch_session().await {
            Ok(Some(user)) => {
                debug!(user_id = user.id, "session is authenticated");
                self.set_user(Some(user));
            }
            Ok(None) => debug!("session is not authenticated"),
            Err(e) => error!(error = %e, "auth check error"),
        }
    }

    /// Run the navigation guard for `route`, checking the session with the
    /// server first when the route needs a user and none is known yet.
    pub async fn navigate(&self, route: &Route) -> Navigation {
        if route.requires_auth() && !self.is_authenticated() {
            self.check_auth().await;
        }
        guard(route, self.is_authenticated())
    }

    async fn submit_credentials(
        &self,
        path: &str,
        credentials: &Credentials<'_>,
    ) -> Result<User, ClientError> {
        let options = RequestOptions::post().json(credentials)?;
        let response = self.http.request_with(path, options).await?;
        let status = response.status().as_u16();
        if !response.status().is_success() {
            let message = crate::api::error_message(response).await;
            return Err(ClientError::AuthRejected { status, message });
        }
        let payload: AuthPayload = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        payload
            .user
            .ok_or_else(|| ClientError::Decode("response has no user".to_string()))
    }

    async fn fetch_session(&self) -> Result<Option<User>, ClientError> {
        let response = self
            .http
            .request_with(CHECK_PATH, RequestOptions::get())
            .await?;
        if !response.status().is_success() {
            return Err(ClientError::AuthRejected {
                status: response.status().as_u16(),
                message: "session check failed".to_string(),
            });
        }
        let payload: AuthPayload = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(payload.user.filter(|_| payload.authenticated))
    }
}
