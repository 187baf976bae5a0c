//! The question-type registry.
//!
//! Every question type a quiz can ask is a variant of [`QuestionType`]. Its
//! static [`QuestionTypeDescriptor`] says how the type is shown and when it
//! can be asked. Adding a type means adding a variant and a registry entry;
//! nothing registers types at runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::Card;

/// Identifier of a question type.
///
/// Declaration order is significant: it is the order in which
/// [`crate::selector::available_types_for`] reports types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Title,
    Keyword,
    QuickFact,
    ListKeywords,
}

impl QuestionType {
    /// All question types, in declaration order.
    pub const ALL: [QuestionType; 4] = [
        QuestionType::Title,
        QuestionType::Keyword,
        QuestionType::QuickFact,
        QuestionType::ListKeywords,
    ];

    /// Wire identifier (e.g. `"quick_fact"`).
    pub fn identifier(self) -> &'static str {
        match self {
            QuestionType::Title => "title",
            QuestionType::Keyword => "keyword",
            QuestionType::QuickFact => "quick_fact",
            QuestionType::ListKeywords => "list_keywords",
        }
    }

    /// The registry entry for this type.
    pub fn descriptor(self) -> &'static QuestionTypeDescriptor {
        &REGISTRY[self as usize]
    }

    pub fn display_name(self) -> &'static str {
        self.descriptor().display_name
    }

    pub fn requires_all_cards(self) -> bool {
        self.descriptor().requires_all_cards
    }

    /// Whether this question type can be asked about `card`.
    pub fn is_available(self, card: &Card) -> bool {
        (self.descriptor().is_available)(card)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuestionType::ALL
            .into_iter()
            .find(|t| t.identifier() == s)
            .ok_or_else(|| format!("unknown question type: {s}"))
    }
}

/// Opaque handle to a view component, identified by component name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewHandle(&'static str);

impl ViewHandle {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

/// Static definition of one question type.
pub struct QuestionTypeDescriptor {
    pub kind: QuestionType,
    /// Human-readable name.
    pub display_name: &'static str,
    /// When quizzing several cards, only offer this type if every card
    /// qualifies. Enforced by callers working on a deck, not by the
    /// per-card selector.
    pub requires_all_cards: bool,
    pub is_available: fn(&Card) -> bool,
    /// View that asks the question.
    pub view: ViewHandle,
    /// View that explains a wrong answer.
    pub wrong_answer_view: ViewHandle,
}

impl fmt::Debug for QuestionTypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuestionTypeDescriptor")
            .field("kind", &self.kind)
            .field("display_name", &self.display_name)
            .field("requires_all_cards", &self.requires_all_cards)
            .field("view", &self.view)
            .field("wrong_answer_view", &self.wrong_answer_view)
            .finish_non_exhaustive()
    }
}

fn always(_: &Card) -> bool {
    true
}

fn has_keywords(card: &Card) -> bool {
    !card.keywords.is_empty()
}

fn has_quick_facts(card: &Card) -> bool {
    !card.quick_facts.is_empty()
}

/// Indexed by `QuestionType as usize`.
static REGISTRY: [QuestionTypeDescriptor; 4] = [
    QuestionTypeDescriptor {
        kind: QuestionType::Title,
        display_name: "Title Question",
        requires_all_cards: false,
        is_available: always,
        view: ViewHandle::new("TitleQuestion"),
        wrong_answer_view: ViewHandle::new("TitleWrongAnswer"),
    },
    QuestionTypeDescriptor {
        kind: QuestionType::Keyword,
        display_name: "Keyword Question",
        requires_all_cards: true,
        is_available: has_keywords,
        view: ViewHandle::new("KeywordQuestion"),
        wrong_answer_view: ViewHandle::new("KeywordWrongAnswer"),
    },
    QuestionTypeDescriptor {
        kind: QuestionType::QuickFact,
        display_name: "Quick Fact Question",
        requires_all_cards: true,
        is_available: has_quick_facts,
        view: ViewHandle::new("QuickFactQuestion"),
        wrong_answer_view: ViewHandle::new("QuickFactWrongAnswer"),
    },
    QuestionTypeDescriptor {
        kind: QuestionType::ListKeywords,
        display_name: "List Keywords Question",
        requires_all_cards: false,
        is_available: has_keywords,
        view: ViewHandle::new("ListKeywordsQuestion"),
        wrong_answer_view: ViewHandle::new("ListKeywordsWrongAnswer"),
    },
];

/// The full registry, in declaration order.
pub fn registry() -> &'static [QuestionTypeDescriptor] {
    &REGISTRY
}

/// Evaluate the availability predicate of `kind` against `card`.
pub fn availability_of(kind: QuestionType, card: &Card) -> bool {
    kind.is_available(card)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_with(keywords: &[&str], facts: &[&str]) -> Card {
        let mut card = Card::new(1, "Rust");
        card.keywords = keywords.iter().map(|s| s.to_string()).collect();
        card.quick_facts = facts.iter().map(|s| s.to_string()).collect();
        card
    }

    #[test]
    fn registry_is_indexed_by_kind() {
        for (i, desc) in registry().iter().enumerate() {
            assert_eq!(desc.kind as usize, i);
            assert_eq!(desc.kind, QuestionType::ALL[i]);
        }
    }

    #[test]
    fn display_names_and_flags() {
        assert_eq!(QuestionType::Title.display_name(), "Title Question");
        assert_eq!(QuestionType::QuickFact.display_name(), "Quick Fact Question");
        assert!(!QuestionType::Title.requires_all_cards());
        assert!(QuestionType::Keyword.requires_all_cards());
        assert!(QuestionType::QuickFact.requires_all_cards());
        assert!(!QuestionType::ListKeywords.requires_all_cards());
    }

    #[test]
    fn title_always_available() {
        assert!(availability_of(QuestionType::Title, &card_with(&[], &[])));
    }

    #[test]
    fn keyword_types_need_keywords() {
        let empty = card_with(&[], &["fact"]);
        let with = card_with(&["borrow"], &[]);
        assert!(!availability_of(QuestionType::Keyword, &empty));
        assert!(!availability_of(QuestionType::ListKeywords, &empty));
        assert!(availability_of(QuestionType::Keyword, &with));
        assert!(availability_of(QuestionType::ListKeywords, &with));
    }

    #[test]
    fn quick_fact_needs_facts() {
        assert!(!availability_of(QuestionType::QuickFact, &card_with(&["k"], &[])));
        assert!(availability_of(QuestionType::QuickFact, &card_with(&[], &["f"])));
    }

    #[test]
    fn view_handles() {
        let desc = QuestionType::ListKeywords.descriptor();
        assert_eq!(desc.view.name(), "ListKeywordsQuestion");
        assert_eq!(desc.wrong_answer_view.name(), "ListKeywordsWrongAnswer");
    }

    #[test]
    fn identifiers_round_trip_through_strings() {
        assert_eq!("quick_fact".parse::<QuestionType>().unwrap(), QuestionType::QuickFact);
        assert_eq!(QuestionType::ListKeywords.to_string(), "list_keywords");
        assert!("essay".parse::<QuestionType>().is_err());
        assert_eq!(
            serde_json::to_string(&QuestionType::QuickFact).unwrap(),
            "\"quick_fact\""
        );
    }
}
