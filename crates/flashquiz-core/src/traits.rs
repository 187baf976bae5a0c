//! Core trait definitions.
//!
//! [`CardRepository`] is implemented by the HTTP client in `flashquiz-client`
//! and by its in-memory mock.

use async_trait::async_trait;

use crate::model::{Card, CardFilter, Label};

/// Something that can list cards and labels for the current user.
#[async_trait]
pub trait CardRepository: Send + Sync {
    /// Cards visible to the current user that pass `filter`.
    async fn list_cards(&self, filter: &CardFilter) -> anyhow::Result<Vec<Card>>;

    /// Labels owned by or shared with the current user.
    async fn list_labels(&self) -> anyhow::Result<Vec<Label>>;
}
