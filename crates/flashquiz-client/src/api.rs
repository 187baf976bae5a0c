//! Cards, labels and user search endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use flashquiz_core::model::{Card, CardDraft, CardFilter, Label, LabelDraft, UserSummary};
use flashquiz_core::traits::CardRepository;

use crate::csrf::{CsrfClient, RequestOptions};
use crate::error::ClientError;

const CARDS_PATH: &str = "/api/cards/";
const LABELS_PATH: &str = "/api/labels/";
const USER_SEARCH_PATH: &str = "/api/users/search/";

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

/// Best-effort human-readable message from an error response.
///
/// Uses the `error` or `detail` field of a JSON body, else the raw body.
pub(crate) async fn error_message(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|e| e.error.or(e.detail))
        .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string())
}

/// Turn a non-2xx response into a [`ClientError`].
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let code = status.as_u16();
    let message = error_message(response).await;
    Err(match code {
        401 | 403 => ClientError::AuthRejected {
            status: code,
            message,
        },
        _ => ClientError::Api {
            status: code,
            message,
        },
    })
}

/// Client for the card and label REST endpoints.
///
/// Shares its [`CsrfClient`] (and thus the session cookie) with the
/// [`crate::auth::AuthSession`] that logged in.
#[derive(Clone)]
pub struct ApiClient {
    http: Arc<CsrfClient>,
}

impl ApiClient {
    pub fn new(http: Arc<CsrfClient>) -> Self {
        Self { http }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ClientError> {
        let response = check(self.http.request_with(path, options).await?).await?;
        response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn execute(&self, path: &str, options: RequestOptions) -> Result<(), ClientError> {
        check(self.http.request_with(path, options).await?).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_cards(&self, filter: &CardFilter) -> Result<Vec<Card>, ClientError> {
        let options = filter
            .query_pairs()
            .into_iter()
            .fold(RequestOptions::get(), |opts, (key, value)| opts.query(key, value));
        self.fetch(CARDS_PATH, options).await
    }

    #[instrument(skip(self))]
    pub async fn get_card(&self, id: i64) -> Result<Card, ClientError> {
        self.fetch(&format!("{CARDS_PATH}{id}/"), RequestOptions::get())
            .await
    }

    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn create_card(&self, draft: &CardDraft) -> Result<Card, ClientError> {
        self.fetch(CARDS_PATH, RequestOptions::post().json(draft)?)
            .await
    }

    #[instrument(skip(self, draft))]
    pub async fn update_card(&self, id: i64, draft: &CardDraft) -> Result<Card, ClientError> {
        let options = RequestOptions::method(Method::PUT).json(draft)?;
        self.fetch(&format!("{CARDS_PATH}{id}/"), options).await
    }

    #[instrument(skip(self))]
    pub async fn delete_card(&self, id: i64) -> Result<(), ClientError> {
        self.execute(
            &format!("{CARDS_PATH}{id}/"),
            RequestOptions::method(Method::DELETE),
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn list_labels(&self) -> Result<Vec<Label>, ClientError> {
        self.fetch(LABELS_PATH, RequestOptions::get()).await
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create_label(&self, draft: &LabelDraft) -> Result<Label, ClientError> {
        self.fetch(LABELS_PATH, RequestOptions::post().json(draft)?)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_label(&self, id: i64) -> Result<(), ClientError> {
        self.execute(
            &format!("{LABELS_PATH}{id}/"),
            RequestOptions::method(Method::DELETE),
        )
        .await
    }

    /// Share a label (and the cards carrying it) with another user. Owner only.
    #[instrument(skip(self))]
    pub async fn share_label(&self, id: i64, username: &str) -> Result<(), ClientError> {
        let options = RequestOptions::post().json(&json!({ "username": username }))?;
        self.execute(&format!("{LABELS_PATH}{id}/share/"), options)
            .await
    }

    #[instrument(skip(self))]
    pub async fn unshare_label(&self, id: i64, username: &str) -> Result<(), ClientError> {
        let options = RequestOptions::post().json(&json!({ "username": username }))?;
        self.execute(&format!("{LABELS_PATH}{id}/unshare/"), options)
            .await
    }

    /// Other users whose name contains `query`; the server returns at most five.
    #[instrument(skip(self))]
    pub async fn search_users(&self, query: &str) -> Result<Vec<UserSummary>, ClientError> {
        self.fetch(USER_SEARCH_PATH, RequestOptions::get().query("q", query))
            .await
    }
}

#[async_trait]
impl CardRepository for ApiClient {
    async fn list_cards(&self, filter: &CardFilter) -> anyhow::Result<Vec<Card>> {
        Ok(ApiClient::list_cards(self, filter).await?)
    }

    async fn list_labels(&self) -> anyhow::Result<Vec<Label>> {
        Ok(ApiClient::list_labels(self).await?)
    }
}
