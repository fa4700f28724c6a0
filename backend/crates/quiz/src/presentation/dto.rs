//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::QuizSessionId;
use serde::{Deserialize, Serialize};

use crate::application::preview_pool::PoolPreview;
use crate::application::settings::SettingsInput;
use crate::domain::entities::{AnswerOutcome, AnswerRecord, Question, QuizSession, SessionProgress};
use crate::domain::services::card_count_options;
use crate::domain::value_objects::{Operation, Pairing, Phase};

/// Body for POST /api/quiz/sessions, POST /api/quiz/preview and
/// PUT /api/quiz/sessions/{id}/settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsRequest {
    #[serde(default)]
    pub operations: Option<Vec<Operation>>,
    #[serde(default)]
    pub numbers: Option<Vec<u32>>,
    #[serde(default)]
    pub pairing: Option<Pairing>,
    #[serde(default)]
    pub cards_per_round: Option<usize>,
}

impl From<SettingsRequest> for SettingsInput {
    fn from(req: SettingsRequest) -> Self {
        SettingsInput {
            operations: req.operations,
            numbers: req.numbers,
            pairing: req.pairing,
            cards_per_round: req.cards_per_round,
        }
    }
}

/// Body for POST /api/quiz/sessions/{id}/answer
///
/// Any integer is accepted and scored; values outside `i64` are rejected
/// by the JSON extractor with 422.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerRequest {
    pub answer: i64,
}

/// A card as shown to the player
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub prompt: String,
    pub left: u32,
    pub right: u32,
    pub operation: Operation,
    pub symbol: &'static str,
}

impl From<&Question> for QuestionView {
    fn from(q: &Question) -> Self {
        Self {
            prompt: q.prompt(),
            left: q.left(),
            right: q.right(),
            operation: q.operation(),
            symbol: q.operation().symbol(),
        }
    }
}

/// Full state of one session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub id: QuizSessionId,
    pub phase: Phase,
    pub operations: Vec<Operation>,
    pub numbers: Vec<u32>,
    pub pairing: Pairing,
    pub cards_per_round: usize,
    pub pool_size: usize,
    pub card_count_options: Vec<usize>,
    pub current_question: Option<QuestionView>,
    /// Only present after a reveal on the current card
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revealed_answer: Option<u32>,
    pub progress: SessionProgress,
    pub history: Vec<AnswerRecord>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionView {
    pub fn new(session: &QuizSession, card_presets: &[usize]) -> Self {
        let settings = session.settings();
        let current = session.current_question();
        Self {
            id: session.id(),
            phase: session.phase(),
            operations: settings.operations.iter().copied().collect(),
            numbers: settings.numbers.iter().copied().collect(),
            pairing: settings.pairing,
            cards_per_round: settings.cards_per_round,
            pool_size: session.pool().len(),
            card_count_options: card_count_options(session.pool().len(), card_presets),
            current_question: current.map(QuestionView::from),
            revealed_answer: current
                .filter(|_| session.answer_revealed())
                .map(Question::answer),
            progress: session.progress(),
            history: session.history().to_vec(),
            created_at: session.created_at(),
            updated_at: session.updated_at(),
        }
    }
}

/// Response for POST /api/quiz/sessions/{id}/answer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResponse {
    pub correct: bool,
    pub expected: u32,
    pub finished: bool,
    pub session: SessionView,
}

impl AnswerResponse {
    pub fn new(outcome: AnswerOutcome, session: SessionView) -> Self {
        Self {
            correct: outcome.correct,
            expected: outcome.expected,
            finished: outcome.finished,
            session,
        }
    }
}

/// Response for POST /api/quiz/sessions/{id}/reveal
#[derive(Debug, Clone, Serialize)]
pub struct RevealResponse {
    pub answer: u32,
    pub session: SessionView,
}

/// Response for POST /api/quiz/preview
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub max_valid_questions: usize,
    pub card_count_options: Vec<usize>,
}

impl From<PoolPreview> for PreviewResponse {
    fn from(preview: PoolPreview) -> Self {
        Self {
            max_valid_questions: preview.max_valid_questions,
            card_count_options: preview.card_count_options,
        }
    }
}
