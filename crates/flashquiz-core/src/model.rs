//! Core data model types for flashquiz.
//!
//! These mirror the JSON shapes served by the flashquiz API. Cards and labels
//! are owned by the server; the client only holds transient copies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A flashcard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier within the card collection.
    pub id: i64,
    /// Card title, the thing being learned.
    pub title: String,
    /// CSS class of the card's icon (see [`crate::icons`]).
    #[serde(default)]
    pub icon: String,
    /// Short facts about the title, in display order.
    #[serde(default)]
    pub quick_facts: Vec<String>,
    /// Keywords associated with the title, in display order.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Labels attached to this card.
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub owner_username: Option<String>,
    #[serde(default)]
    pub is_owner: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Card {
    /// Create a card with only an id and title; all lists empty.
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            icon: String::new(),
            quick_facts: Vec::new(),
            keywords: Vec::new(),
            labels: Vec::new(),
            owner_username: None,
            is_owner: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Whether any attached label has the given id.
    pub fn has_label(&self, label_id: i64) -> bool {
        self.labels.iter().any(|l| l.id == label_id)
    }
}

/// A user-defined tag attachable to cards, optionally shared with other users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub id: i64,
    pub name: String,
    /// Display color, typically a hex string.
    pub color: String,
    #[serde(default)]
    pub owner_username: Option<String>,
    #[serde(default)]
    pub shared_with_usernames: Option<Vec<String>>,
    #[serde(default)]
    pub is_owner: Option<bool>,
    /// Number of cards carrying this label, when the server reports it.
    #[serde(default)]
    pub card_count: Option<u32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Label {
    pub fn new(id: i64, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
            owner_username: None,
            shared_with_usernames: None,
            is_owner: None,
            card_count: None,
            created_at: None,
        }
    }
}

/// An authenticated user as reported by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
}

/// Result item of a user search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub username: String,
}

/// Write shape for creating or updating a card.
///
/// The API returns labels as nested objects but accepts them by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardDraft {
    pub title: String,
    pub icon: String,
    #[serde(default)]
    pub quick_facts: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub label_ids: Vec<i64>,
}

impl From<&Card> for CardDraft {
    fn from(card: &Card) -> Self {
        Self {
            title: card.title.clone(),
            icon: card.icon.clone(),
            quick_facts: card.quick_facts.clone(),
            keywords: card.keywords.clone(),
            label_ids: card.labels.iter().map(|l| l.id).collect(),
        }
    }
}

/// Write shape for creating a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelDraft {
    pub name: String,
    pub color: String,
}

/// Which cards to load for a listing or a quiz.
///
/// Same semantics as the `labels` / `include_unlabeled` query parameters of
/// the card list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFilter {
    #[serde(default)]
    pub label_ids: Vec<i64>,
    #[serde(default)]
    pub include_unlabeled: bool,
}

impl CardFilter {
    /// Filter on the given label ids.
    pub fn labels(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            label_ids: ids.into_iter().collect(),
            include_unlabeled: false,
        }
    }

    /// Also accept cards without any label.
    pub fn with_unlabeled(mut self) -> Self {
        self.include_unlabeled = true;
        self
    }

    /// Query parameters for the card list endpoint.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.label_ids.is_empty() {
            let ids: Vec<String> = self.label_ids.iter().map(|id| id.to_string()).collect();
            pairs.push(("labels", ids.join(",")));
        }
        if self.include_unlabeled {
            pairs.push(("include_unlabeled", "true".to_string()));
        }
        pairs
    }

    /// Apply the filter locally.
    pub fn matches(&self, card: &Card) -> bool {
        let unlabeled = card.labels.is_empty();
        match (self.label_ids.is_empty(), self.include_unlabeled) {
            (true, false) => true,
            (true, true) => unlabeled,
            (false, include_unlabeled) => {
                self.label_ids.iter().any(|id| card.has_label(*id))
                    || (include_unlabeled && unlabeled)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_missing_lists_default_to_empty() {
        let card: Card = serde_json::from_str(r#"{"id": 3, "title": "Rust"}"#).unwrap();
        assert!(card.keywords.is_empty());
        assert!(card.quick_facts.is_empty());
        assert!(card.labels.is_empty());
        assert_eq!(card.owner_username, None);
    }

    #[test]
    fn card_parses_api_shape() {
        let json = r##"{
            "id": 7,
            "title": "Mitochondria",
            "icon": "pi pi-bolt",
            "quick_facts": ["Powerhouse of the cell"],
            "keywords": ["ATP", "organelle"],
            "labels": [{"id": 1, "name": "Biology", "color": "#10B981",
                        "owner_username": "alice", "shared_with_usernames": ["bob"],
                        "is_owner": true, "created_at": "2025-01-02T10:00:00Z"}],
            "owner_username": "alice",
            "created_at": "2025-01-02T10:00:00Z",
            "updated_at": "2025-01-03T10:00:00Z"
        }"##;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.keywords, vec!["ATP", "organelle"]);
        assert_eq!(card.labels[0].shared_with_usernames.as_deref(), Some(&["bob".to_string()][..]));
        assert!(card.has_label(1));
        assert!(!card.has_label(2));
        assert!(card.updated_at.is_some());
    }

    #[test]
    fn draft_from_card_uses_label_ids() {
        let mut card = Card::new(1, "Paris");
        card.labels.push(Label::new(4, "Geo", "#fff"));
        card.labels.push(Label::new(9, "Cities", "#000"));
        let draft = CardDraft::from(&card);
        assert_eq!(draft.label_ids, vec![4, 9]);
        assert_eq!(draft.title, "Paris");
    }

    #[test]
    fn filter_query_pairs() {
        assert!(CardFilter::default().query_pairs().is_empty());
        let filter = CardFilter::labels([1, 2]).with_unlabeled();
        assert_eq!(
            filter.query_pairs(),
            vec![
                ("labels", "1,2".to_string()),
                ("include_unlabeled", "true".to_string())
            ]
        );
    }

    #[test]
    fn filter_matches_like_the_server() {
        let mut labeled = Card::new(1, "a");
        labeled.labels.push(Label::new(5, "x", "#111"));
        let mut other = Card::new(2, "b");
        other.labels.push(Label::new(6, "y", "#222"));
        let bare = Card::new(3, "c");

        let all = CardFilter::default();
        assert!(all.matches(&labeled) && all.matches(&other) && all.matches(&bare));

        let only_unlabeled = CardFilter::default().with_unlabeled();
        assert!(!only_unlabeled.matches(&labeled));
        assert!(only_unlabeled.matches(&bare));

        let by_label = CardFilter::labels([5]);
        assert!(by_label.matches(&labeled));
        assert!(!by_label.matches(&other));
        assert!(!by_label.matches(&bare));

        let union = CardFilter::labels([5]).with_unlabeled();
        assert!(union.matches(&labeled));
        assert!(!union.matches(&other));
        assert!(union.matches(&bare));
    }
}
