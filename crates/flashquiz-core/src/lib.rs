//! flashquiz-core — card model, question-type registry and quiz selection.
//!
//! This crate holds everything about flashcards and quizzes that does not
//! touch the network: the data model shared with the API, the closed set of
//! question types and when each applies, random selection over them, and the
//! static route and theme configuration of the app.

pub mod error;
pub mod icons;
pub mod model;
pub mod question;
pub mod quiz;
pub mod routes;
pub mod selector;
pub mod theme;
pub mod traits;

pub use error::QuizError;
pub use model::{Card, CardDraft, CardFilter, Label, LabelDraft, User, UserSummary};
pub use question::{QuestionType, QuestionTypeDescriptor};
pub use selector::{available_types_for, select_random, IndexSource, SeededSource};
