//! Preview Pool Use Case
//!
//! Sizes a selection without creating a session, so a caller can offer
//! only the round lengths that fit.

use crate::application::config::QuizConfig;
use crate::application::settings::SettingsInput;
use crate::domain::services::{card_count_options, max_valid_questions};
use crate::error::QuizResult;
use std::sync::Arc;

/// Output DTO for preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolPreview {
    pub max_valid_questions: usize,
    pub card_count_options: Vec<usize>,
}

/// Preview Pool Use Case
pub struct PreviewPoolUseCase {
    config: Arc<QuizConfig>,
}

impl PreviewPoolUseCase {
    pub fn new(config: Arc<QuizConfig>) -> Self {
        Self { config }
    }

    /// An unusable selection previews as an empty pool rather than failing.
    pub fn execute(&self, input: SettingsInput) -> QuizResult<PoolPreview> {
        let settings = input.resolve(&self.config)?;
        let max_valid = max_valid_questions(&settings.operations, &settings.numbers, settings.pairing);

        Ok(PoolPreview {
            max_valid_questions: max_valid,
            card_count_options: card_count_options(max_valid, &self.config.card_presets),
        })
    }
}
