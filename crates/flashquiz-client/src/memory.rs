//! In-memory card repository.

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use flashquiz_core::model::{Card, CardFilter, Label};
use flashquiz_core::traits::CardRepository;

/// A [`CardRepository`] over a fixed set of cards, for offline quizzes and
/// tests. Filtering follows the same rules as the server.
pub struct InMemoryRepository {
    cards: Vec<Card>,
    labels: Vec<Label>,
}

/// On-disk deck: either a bare card array or `{ "cards": [...], "labels": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum DeckFile {
    Cards(Vec<Card>),
    Deck {
        cards: Vec<Card>,
        #[serde(default)]
        labels: Vec<Label>,
    },
}

impl InMemoryRepository {
    /// Labels are collected from the cards.
    pub fn new(cards: Vec<Card>) -> Self {
        let mut labels: Vec<Label> = Vec::new();
        for label in cards.iter().flat_map(|c| &c.labels) {
            if !labels.iter().any(|l| l.id == label.id) {
                labels.push(label.clone());
            }
        }
        Self::with_labels(cards, labels)
    }

    pub fn with_labels(cards: Vec<Card>, labels: Vec<Label>) -> Self {
        Self { cards, labels }
    }

    /// Load a deck from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read deck: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("failed to parse deck: {}", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(match serde_json::from_str::<DeckFile>(content)? {
            DeckFile::Cards(cards) => Self::new(cards),
            DeckFile::Deck { cards, labels } if labels.is_empty() => Self::new(cards),
            DeckFile::Deck { cards, labels } => Self::with_labels(cards, labels),
        })
    }
}

#[async_trait]
impl CardRepository for InMemoryRepository {
    async fn list_cards(&self, filter: &CardFilter) -> Result<Vec<Card>> {
        Ok(self
            .cards
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect())
    }

    async fn list_labels(&self) -> Result<Vec<Label>> {
        Ok(self.labels.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECK: &str = r##"[
        {"id": 1, "title": "Paris", "keywords": ["France"], "labels": [{"id": 1, "name": "Geo", "color": "#fff"}]},
        {"id": 2, "title": "Rome", "quick_facts": ["Founded 753 BC"], "labels": [{"id": 1, "name": "Geo", "color": "#fff"}]},
        {"id": 3, "title": "Borrowing"}
    ]"##;

    #[tokio::test]
    async fn filters_like_the_server() {
        let repo = InMemoryRepository::from_json(DECK).unwrap();
        let geo = repo.list_cards(&CardFilter::labels([1])).await.unwrap();
        assert_eq!(geo.len(), 2);
        let unlabeled = repo
            .list_cards(&CardFilter::default().with_unlabeled())
            .await
            .unwrap();
        assert_eq!(unlabeled.len(), 1);
        assert_eq!(unlabeled[0].title, "Borrowing");
    }

    #[tokio::test]
    async fn labels_are_collected_from_cards() {
        let repo = InMemoryRepository::from_json(DECK).unwrap();
        let labels = repo.list_labels().await.unwrap();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].name, "Geo");
    }

    #[test]
    fn deck_object_form() {
        let repo = InMemoryRepository::from_json(
            r##"{"cards": [{"id": 1, "title": "x"}], "labels": [{"id": 9, "name": "Empty", "color": "#000"}]}"##,
        )
        .unwrap();
        assert_eq!(repo.labels.len(), 1);
        assert_eq!(repo.cards.len(), 1);
    }

    #[test]
    fn invalid_deck_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("deck.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = InMemoryRepository::from_json_file(&path).err().unwrap();
        assert!(format!("{err:#}").contains("failed to parse deck"));
    }
}
