//! Domain Entities
//!
//! Core business entities for the quiz domain: the arithmetic fact
//! ([`Question`]), the set of facts for a selection ([`QuestionPool`]) and
//! the mutable record of one quiz ([`QuizSession`]).

use chrono::{DateTime, Utc};
use kernel::id::QuizSessionId;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::services::generate_question_pool;
use crate::domain::value_objects::{Operation, Pairing, Phase};
use crate::error::{QuizError, QuizResult};

// ============================================================================
// Question
// ============================================================================

/// A single arithmetic fact.
///
/// Operands are normalized on construction so that the implied result is
/// always a non-negative integer: subtraction and division put the larger
/// operand on the left, and division only exists when it is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Question {
    operation: Operation,
    left: u32,
    right: u32,
}

impl Question {
    /// Build the fact for an operand pair, or `None` when the pair has no
    /// valid fact for this operation (inexact division, zero divisor).
    pub fn new(operation: Operation, a: u32, b: u32) -> Option<Self> {
        let (left, right) = match operation {
            Operation::Addition | Operation::Multiplication => (a, b),
            Operation::Subtraction => (a.max(b), a.min(b)),
            Operation::Division => {
                let (dividend, divisor) = (a.max(b), a.min(b));
                if divisor == 0 || dividend % divisor != 0 {
                    return None;
                }
                (dividend, divisor)
            }
        };
        Some(Self {
            operation,
            left,
            right,
        })
    }

    #[must_use]
    pub fn operation(&self) -> Operation {
        self.operation
    }

    #[must_use]
    pub fn left(&self) -> u32 {
        self.left
    }

    #[must_use]
    pub fn right(&self) -> u32 {
        self.right
    }

    /// The implied correct result
    #[must_use]
    pub fn answer(&self) -> u32 {
        match self.operation {
            Operation::Addition => self.left + self.right,
            Operation::Subtraction => self.left - self.right,
            Operation::Multiplication => self.left * self.right,
            Operation::Division => self.left / self.right,
        }
    }

    /// Exact-equality check of a submitted answer; negative values are
    /// simply wrong
    #[must_use]
    pub fn is_correct(&self, submitted: i64) -> bool {
        submitted == i64::from(self.answer())
    }

    /// Card face text, e.g. `"7 x 8"`
    #[must_use]
    pub fn prompt(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.operation.symbol(), self.right)
    }
}

// ============================================================================
// QuestionPool
// ============================================================================

/// Every valid fact for one configuration.
///
/// Kept ordered so that identical inputs always produce identical pools;
/// randomness only enters when a round is dealt. Shared, so cloning a
/// session does not copy its pool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionPool {
    questions: Arc<BTreeSet<Question>>,
}

impl QuestionPool {
    pub fn from_questions(questions: impl IntoIterator<Item = Question>) -> Self {
        Self {
            questions: Arc::new(questions.into_iter().collect()),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn contains(&self, question: &Question) -> bool {
        self.questions.contains(question)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    /// Shuffle the pool and take the first `count` cards.
    pub fn deal<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<Question> {
        let mut cards: Vec<Question> = self.questions.iter().copied().collect();
        cards.shuffle(rng);
        cards.truncate(count);
        cards
    }
}

// ============================================================================
// QuizSession
// ============================================================================

/// Player-chosen configuration of a quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSettings {
    pub operations: BTreeSet<Operation>,
    pub numbers: BTreeSet<u32>,
    pub pairing: Pairing,
    pub cards_per_round: usize,
}

/// One closed card in the round history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question: Question,
    /// `None` when the card was skipped
    pub submitted: Option<i64>,
    pub correct: bool,
    pub revealed: bool,
}

/// Result of answering the current card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub expected: u32,
    pub finished: bool,
}

/// Aggregated view of round progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub score: usize,
    pub is_complete: bool,
}

/// The mutable record of one quiz: configuration, dealt round, position
/// and score.
///
/// Invariants:
/// - `position <= round.len() <= pool.len()`
/// - `score <= position`
/// - phase only moves forward; `reset` is the single way back to
///   `Configuring`
#[derive(Debug, Clone)]
pub struct QuizSession {
    id: QuizSessionId,
    settings: QuizSettings,
    pool: QuestionPool,
    round: Vec<Question>,
    position: usize,
    score: usize,
    history: Vec<AnswerRecord>,
    answer_revealed: bool,
    phase: Phase,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl QuizSession {
    /// Create a session in the `Configuring` phase with its pool generated.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidConfiguration` for an empty or invalid
    /// selection.
    pub fn new(id: QuizSessionId, settings: QuizSettings) -> QuizResult<Self> {
        let (settings, pool) = Self::materialize(settings)?;
        let now = Utc::now();
        Ok(Self {
            id,
            settings,
            pool,
            round: Vec::new(),
            position: 0,
            score: 0,
            history: Vec::new(),
            answer_revealed: false,
            phase: Phase::Configuring,
            created_at: now,
            updated_at: now,
        })
    }

    fn materialize(mut settings: QuizSettings) -> QuizResult<(QuizSettings, QuestionPool)> {
        if settings.cards_per_round == 0 {
            return Err(QuizError::invalid_config(
                "cards per round must be at least 1",
            ));
        }
        let pool =
            generate_question_pool(&settings.operations, &settings.numbers, settings.pairing)?;
        settings.cards_per_round = settings.cards_per_round.min(pool.len());
        Ok((settings, pool))
    }

    // ========================================================================
    // Configuring
    // ========================================================================

    /// Replace the configuration and regenerate the pool.
    pub fn configure(&mut self, settings: QuizSettings) -> QuizResult<()> {
        self.require(Phase::Configuring, "reconfigure")?;
        let (settings, pool) = Self::materialize(settings)?;
        self.settings = settings;
        self.pool = pool;
        self.touch();
        Ok(())
    }

    /// Change the round length; clamped to the pool size.
    pub fn set_cards_per_round(&mut self, cards: usize) -> QuizResult<usize> {
        self.require(Phase::Configuring, "change cards per round")?;
        if cards == 0 {
            return Err(QuizError::invalid_config(
                "cards per round must be at least 1",
            ));
        }
        self.settings.cards_per_round = cards.min(self.pool.len());
        self.touch();
        Ok(self.settings.cards_per_round)
    }

    /// Deal a shuffled round and move to `InProgress`.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> QuizResult<()> {
        self.require(Phase::Configuring, "start")?;
        let count = self.settings.cards_per_round.min(self.pool.len());
        if count == 0 {
            return Err(QuizError::invalid_config("question pool is empty"));
        }
        self.round = self.pool.deal(count, rng);
        self.position = 0;
        self.score = 0;
        self.history.clear();
        self.answer_revealed = false;
        self.phase = Phase::InProgress;
        self.touch();
        Ok(())
    }

    // ========================================================================
    // In progress
    // ========================================================================

    /// The card currently shown, while a round is in progress.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.phase.is_in_progress() {
            self.round.get(self.position)
        } else {
            None
        }
    }

    /// Check an answer against the current card and advance.
    pub fn submit_answer(&mut self, submitted: i64) -> QuizResult<AnswerOutcome> {
        let question = self.current_for("answer")?;
        let correct = question.is_correct(submitted);
        if correct {
            self.score += 1;
        }
        self.close_card(question, Some(submitted), correct);
        Ok(AnswerOutcome {
            correct,
            expected: question.answer(),
            finished: self.phase.is_finished(),
        })
    }

    /// Advance past the current card without scoring it.
    pub fn skip(&mut self) -> QuizResult<()> {
        let question = self.current_for("skip")?;
        self.close_card(question, None, false);
        Ok(())
    }

    /// Show the current card's answer.
    pub fn reveal_answer(&mut self) -> QuizResult<u32> {
        let question = self.current_for("reveal the answer")?;
        self.answer_revealed = true;
        self.touch();
        Ok(question.answer())
    }

    fn current_for(&self, action: &'static str) -> QuizResult<Question> {
        self.require(Phase::InProgress, action)?;
        self.round
            .get(self.position)
            .copied()
            .ok_or_else(|| QuizError::Internal("in-progress session has no current card".into()))
    }

    fn close_card(&mut self, question: Question, submitted: Option<i64>, correct: bool) {
        self.history.push(AnswerRecord {
            question,
            submitted,
            correct,
            revealed: self.answer_revealed,
        });
        self.answer_revealed = false;
        self.position += 1;
        if self.position >= self.round.len() {
            self.phase = Phase::Finished;
        }
        self.touch();
    }

    // ========================================================================
    // Any phase
    // ========================================================================

    /// Back to `Configuring`; configuration and pool are kept.
    pub fn reset(&mut self) {
        self.phase = Phase::Configuring;
        self.round.clear();
        self.position = 0;
        self.score = 0;
        self.history.clear();
        self.answer_revealed = false;
        self.touch();
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = match self.phase {
            Phase::Configuring => self.settings.cards_per_round,
            Phase::InProgress | Phase::Finished => self.round.len(),
        };
        SessionProgress {
            total,
            answered: self.position,
            remaining: total.saturating_sub(self.position),
            score: self.score,
            is_complete: self.phase.is_finished(),
        }
    }

    /// True when nothing has touched the session for longer than `ttl`.
    #[must_use]
    pub fn is_idle(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let idle = now.signed_duration_since(self.updated_at);
        idle.to_std().map(|idle| idle > ttl).unwrap_or(false)
    }

    fn require(&self, phase: Phase, action: &'static str) -> QuizResult<()> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(QuizError::transition(self.phase, action))
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn id(&self) -> QuizSessionId {
        self.id
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn pool(&self) -> &QuestionPool {
        &self.pool
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn history(&self) -> &[AnswerRecord] {
        &self.history
    }

    #[must_use]
    pub fn answer_revealed(&self) -> bool {
        self.answer_revealed
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn settings(ops: &[Operation], numbers: &[u32], cards: usize) -> QuizSettings {
        QuizSettings {
            operations: ops.iter().copied().collect(),
            numbers: numbers.iter().copied().collect(),
            pairing: Pairing::Selection,
            cards_per_round: cards,
        }
    }

    fn started(cards: usize) -> QuizSession {
        let mut session = QuizSession::new(
            QuizSessionId::new(),
            settings(&[Operation::Multiplication], &[1, 2, 3], cards),
        )
        .unwrap();
        session.start(&mut StdRng::seed_from_u64(7)).unwrap();
        session
    }

    #[test]
    fn question_normalizes_subtraction_and_division() {
        let sub = Question::new(Operation::Subtraction, 3, 9).unwrap();
        assert_eq!((sub.left(), sub.right(), sub.answer()), (9, 3, 6));

        let div = Question::new(Operation::Division, 4, 12).unwrap();
        assert_eq!((div.left(), div.right(), div.answer()), (12, 4, 3));
        assert_eq!(div.prompt(), "12 ÷ 4");

        assert!(Question::new(Operation::Division, 5, 7).is_none());
        assert!(Question::new(Operation::Division, 0, 7).is_none());
    }

    #[test]
    fn question_checks_exact_answer() {
        let q = Question::new(Operation::Multiplication, 7, 8).unwrap();
        assert!(q.is_correct(56));
        assert!(!q.is_correct(54));
        assert!(!q.is_correct(-56));
        assert_eq!(q.to_string(), "7 x 8");
    }

    #[test]
    fn new_session_is_configuring_and_clamps_round() {
        let session = QuizSession::new(
            QuizSessionId::new(),
            settings(&[Operation::Multiplication], &[1, 2, 3], 25),
        )
        .unwrap();
        assert_eq!(session.phase(), Phase::Configuring);
        assert_eq!(session.pool().len(), 6);
        assert_eq!(session.settings().cards_per_round, 6);
        assert!(session.current_question().is_none());
    }

    #[test]
    fn zero_cards_per_round_is_rejected() {
        let err = QuizSession::new(
            QuizSessionId::new(),
            settings(&[Operation::Addition], &[1], 0),
        )
        .unwrap_err();
        assert!(matches!(err, QuizError::InvalidConfiguration(_)));
    }

    #[test]
    fn answering_before_start_is_invalid_transition() {
        let mut session = QuizSession::new(
            QuizSessionId::new(),
            settings(&[Operation::Addition], &[1, 2], 3),
        )
        .unwrap();
        let err = session.submit_answer(2).unwrap_err();
        assert_eq!(
            err,
            QuizError::InvalidStateTransition {
                from: Phase::Configuring,
                action: "answer",
            }
        );
    }

    #[test]
    fn score_counts_only_correct_answers() {
        let mut session = started(3);

        let first = *session.current_question().unwrap();
        let outcome = session.submit_answer(first.answer().into()).unwrap();
        assert!(outcome.correct);

        let second = *session.current_question().unwrap();
        let outcome = session.submit_answer(i64::from(second.answer()) + 1).unwrap();
        assert!(!outcome.correct);
        assert_eq!(outcome.expected, second.answer());

        assert_eq!(session.score(), 1);
        assert_eq!(session.position(), 2);
        assert!(session.score() <= session.position());
    }

    #[test]
    fn last_card_finishes_and_further_advance_fails() {
        let mut session = started(2);
        session.skip().unwrap();
        let q = *session.current_question().unwrap();
        let outcome = session.submit_answer(q.answer().into()).unwrap();

        assert!(outcome.finished);
        assert_eq!(session.phase(), Phase::Finished);
        assert!(session.current_question().is_none());
        assert!(matches!(
            session.skip(),
            Err(QuizError::InvalidStateTransition {
                from: Phase::Finished,
                ..
            })
        ));
        assert!(session.submit_answer(1).is_err());
        assert!(session.start(&mut StdRng::seed_from_u64(1)).is_err());
    }

    #[test]
    fn reveal_is_recorded_and_cleared_on_advance() {
        let mut session = started(2);
        let q = *session.current_question().unwrap();
        assert_eq!(session.reveal_answer().unwrap(), q.answer());
        assert!(session.answer_revealed());

        session.submit_answer(q.answer().into()).unwrap();
        assert!(!session.answer_revealed());
        assert!(session.history()[0].revealed);
        assert!(session.history()[0].correct);
    }

    #[test]
    fn reset_returns_to_configuring_and_keeps_pool() {
        let mut session = started(3);
        let q = *session.current_question().unwrap();
        session.submit_answer(q.answer().into()).unwrap();

        session.reset();
        assert_eq!(session.phase(), Phase::Configuring);
        assert_eq!(session.score(), 0);
        assert_eq!(session.position(), 0);
        assert!(session.history().is_empty());
        assert_eq!(session.pool().len(), 6);

        session.start(&mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(session.phase(), Phase::InProgress);
    }

    #[test]
    fn configure_only_while_configuring() {
        let mut session = started(3);
        let err = session
            .configure(settings(&[Operation::Addition], &[4], 5))
            .unwrap_err();
        assert!(matches!(err, QuizError::InvalidStateTransition { .. }));

        session.reset();
        session
            .configure(settings(&[Operation::Addition], &[4, 5], 5))
            .unwrap();
        assert_eq!(session.pool().len(), 3);
        assert_eq!(session.settings().cards_per_round, 3);
    }

    #[test]
    fn round_is_a_shuffled_subset_of_the_pool() {
        let mut session = started(4);
        let mut seen = BTreeSet::new();
        while let Some(q) = session.current_question().copied() {
            assert!(session.pool().contains(&q));
            assert!(seen.insert(q), "a card was dealt twice");
            session.skip().unwrap();
        }
        assert_eq!(seen.len(), 4);
        assert_eq!(session.progress().remaining, 0);
        assert!(session.progress().is_complete);
    }

    #[test]
    fn idle_detection_uses_last_update() {
        let session = started(1);
        let later = session.updated_at() + chrono::Duration::seconds(120);
        assert!(session.is_idle(later, Duration::from_secs(60)));
        assert!(!session.is_idle(later, Duration::from_secs(600)));
    }
}
