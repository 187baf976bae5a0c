//! Question selection for a card.
//!
//! Selection is a pure function of the registry, the card, and an injected
//! [`IndexSource`]. Pass a seeded or scripted source to make quizzes
//! reproducible.

use std::collections::VecDeque;

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::QuizError;
use crate::model::Card;
use crate::question::QuestionType;

/// A source of random indices.
pub trait IndexSource {
    /// Return an index in `0..len`. `len` is never zero.
    fn next_index(&mut self, len: usize) -> usize;
}

impl<R: RngCore> IndexSource for R {
    fn next_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// Deterministic ChaCha8-backed source; the same seed yields the same picks.
#[derive(Clone, Debug)]
pub struct SeededSource {
    inner: ChaCha8Rng,
}

impl SeededSource {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl IndexSource for SeededSource {
    fn next_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }
}

/// Replays a fixed sequence of indices, cycling when exhausted.
///
/// Indices larger than the candidate count wrap around.
#[derive(Clone, Debug)]
pub struct SequenceSource {
    indices: VecDeque<usize>,
}

impl SequenceSource {
    /// An empty script behaves like `[0]`.
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
        let mut indices: VecDeque<usize> = indices.into_iter().collect();
        if indices.is_empty() {
            indices.push_back(0);
        }
        Self { indices }
    }
}

impl IndexSource for SequenceSource {
    fn next_index(&mut self, len: usize) -> usize {
        let next = self.indices.pop_front().unwrap_or(0);
        self.indices.push_back(next);
        next % len
    }
}

/// Question types available for `card`, in registry declaration order.
pub fn available_types_for(card: &Card) -> Vec<QuestionType> {
    QuestionType::ALL
        .into_iter()
        .filter(|t| t.is_available(card))
        .collect()
}

/// Pick one question type for `card` uniformly at random.
pub fn select_random<S>(card: &Card, source: &mut S) -> Result<QuestionType, QuizError>
where
    S: IndexSource + ?Sized,
{
    choose(card.id, &available_types_for(card), source)
}

/// Question types available for `card` when it is quizzed as part of `deck`.
///
/// Types flagged `requires_all_cards` are only kept when every card in the
/// deck satisfies them as well.
pub fn available_types_for_deck(card: &Card, deck: &[Card]) -> Vec<QuestionType> {
    available_types_for(card)
        .into_iter()
        .filter(|t| !t.requires_all_cards() || deck.iter().all(|c| t.is_available(c)))
        .collect()
}

/// Like [`select_random`], restricted to [`available_types_for_deck`].
pub fn select_random_in_deck<S>(
    card: &Card,
    deck: &[Card],
    source: &mut S,
) -> Result<QuestionType, QuizError>
where
    S: IndexSource + ?Sized,
{
    choose(card.id, &available_types_for_deck(card, deck), source)
}

/// Pick one of `candidates`, failing with `EmptySelection` when there are none.
pub fn choose<S>(
    card_id: i64,
    candidates: &[QuestionType],
    source: &mut S,
) -> Result<QuestionType, QuizError>
where
    S: IndexSource + ?Sized,
{
    if candidates.is_empty() {
        return Err(QuizError::EmptySelection { card_id });
    }
    let idx = source.next_index(candidates.len()) % candidates.len();
    Ok(candidates[idx])
}
