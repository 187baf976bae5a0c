//! Quiz planning.
//!
//! Loads a deck of cards and picks a question type for every card, honoring
//! the `requires_all_cards` flag across the deck.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::QuizError;
use crate::model::{Card, CardFilter};
use crate::question::QuestionType;
use crate::selector::{select_random_in_deck, IndexSource};
use crate::traits::CardRepository;

/// One question in a planned quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizItem {
    pub card: Card,
    pub question_type: QuestionType,
}

/// A planned quiz over a deck of cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizPlan {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Names of the labels the deck was filtered on.
    pub label_names: Vec<String>,
    pub items: Vec<QuizItem>,
}

impl QuizPlan {
    /// Number of items asked with the given question type.
    pub fn count_of(&self, kind: QuestionType) -> usize {
        self.items.iter().filter(|i| i.question_type == kind).count()
    }
}

/// Assign a question type to every card of `deck`, in deck order.
pub fn plan_deck<S>(deck: Vec<Card>, source: &mut S) -> Result<Vec<QuizItem>, QuizError>
where
    S: IndexSource + ?Sized,
{
    if deck.is_empty() {
        return Err(QuizError::NoCards);
    }
    let mut items = Vec::with_capacity(deck.len());
    for card in &deck {
        let question_type = select_random_in_deck(card, &deck, source)?;
        debug!(card_id = card.id, %question_type, "selected question type");
        items.push(QuizItem {
            card: card.clone(),
            question_type,
        });
    }
    Ok(items)
}

/// Load the cards matching `filter` from `repo` and plan a quiz over them.
pub async fn plan_quiz<S>(
    repo: &dyn CardRepository,
    filter: &CardFilter,
    source: &mut S,
) -> Result<QuizPlan, QuizError>
where
    S: IndexSource + ?Sized,
{
    let (cards, labels) = futures::try_join!(repo.list_cards(filter), repo.list_labels())
        .map_err(|e| QuizError::Repository(format!("{e:#}")))?;

    let label_names = labels
        .into_iter()
        .filter(|l| filter.label_ids.contains(&l.id))
        .map(|l| l.name)
        .collect();

    let items = plan_deck(cards, source)?;
    let plan = QuizPlan {
        id: Uuid::new_v4(),
        created_at: Utc::now(),
        label_names,
        items,
    };
    info!(quiz_id = %plan.id, questions = plan.items.len(), "planned quiz");
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Label;
    use crate::selector::SequenceSource;
    use async_trait::async_trait;

    struct StaticRepo {
        cards: Vec<Card>,
        labels: Vec<Label>,
        fail: bool,
    }

    #[async_trait]
    impl CardRepository for StaticRepo {
        async fn list_cards(&self, filter: &CardFilter) -> anyhow::Result<Vec<Card>> {
            if self.fail {
                anyhow::bail!("connection refused");
            }
            Ok(self
                .cards
                .iter()
                .filter(|c| filter.matches(c))
                .cloned()
                .collect())
        }

        async fn list_labels(&self) -> anyhow::Result<Vec<Label>> {
            Ok(self.labels.clone())
        }
    }

    fn card(id: i64, keywords: &[&str], facts: &[&str], label: Option<&Label>) -> Card {
        let mut c = Card::new(id, format!("card {id}"));
        c.keywords = keywords.iter().map(|s| s.to_string()).collect();
        c.quick_facts = facts.iter().map(|s| s.to_string()).collect();
        c.labels.extend(label.cloned());
        c
    }

    #[tokio::test]
    async fn plans_one_item_per_matching_card() {
        let bio = Label::new(1, "Biology", "#10B981");
        let repo = StaticRepo {
            cards: vec![
                card(1, &["atp"], &["fact"], Some(&bio)),
                card(2, &["dna"], &[], Some(&bio)),
                card(3, &["x"], &["y"], None),
            ],
            labels: vec![bio.clone(), Label::new(2, "History", "#EF4444")],
            fail: false,
        };

        // Card 2 has no facts, so quick_fact is never offered in this deck.
        let mut source = SequenceSource::new([0, 1, 2, 3]);
        let plan = plan_quiz(&repo, &CardFilter::labels([1]), &mut source)
            .await
            .unwrap();

        assert_eq!(plan.items.len(), 2);
        assert_eq!(plan.label_names, vec!["Biology"]);
        assert_eq!(plan.count_of(QuestionType::QuickFact), 0);
        // [title, keyword, list_keywords] for both cards
        assert_eq!(plan.items[0].question_type, QuestionType::Title);
        assert_eq!(plan.items[1].question_type, QuestionType::Keyword);
    }

    #[tokio::test]
    async fn empty_deck_is_an_error() {
        let repo = StaticRepo {
            cards: vec![],
            labels: vec![],
            fail: false,
        };
        let mut source = SequenceSource::new([0]);
        let err = plan_quiz(&repo, &CardFilter::default(), &mut source)
            .await
            .unwrap_err();
        assert_eq!(err, QuizError::NoCards);
    }

    #[tokio::test]
    async fn repository_failures_are_reported() {
        let repo = StaticRepo {
            cards: vec![],
            labels: vec![],
            fail: true,
        };
        let mut source = SequenceSource::new([0]);
        let err = plan_quiz(&repo, &CardFilter::default(), &mut source)
            .await
            .unwrap_err();
        assert!(matches!(err, QuizError::Repository(msg) if msg.contains("connection refused")));
    }

    #[test]
    fn plan_deck_preserves_order() {
        let deck = vec![card(5, &[], &[], None), card(6, &[], &[], None)];
        let mut source = SequenceSource::new([0]);
        let items = plan_deck(deck, &mut source).unwrap();
        let ids: Vec<i64> = items.iter().map(|i| i.card.id).collect();
        assert_eq!(ids, vec![5, 6]);
        assert!(items.iter().all(|i| i.question_type == QuestionType::Title));
    }
}
