//! Settings Input
//!
//! Partial settings as they arrive from a caller, and how missing fields
//! are filled in.

use std::collections::BTreeSet;

use crate::application::config::QuizConfig;
use crate::domain::entities::QuizSettings;
use crate::domain::value_objects::{Operation, Pairing};
use crate::error::{QuizError, QuizResult};

/// Caller-provided settings; `None` means "keep the fallback"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsInput {
    pub operations: Option<Vec<Operation>>,
    pub numbers: Option<Vec<u32>>,
    pub pairing: Option<Pairing>,
    pub cards_per_round: Option<usize>,
}

impl SettingsInput {
    /// True when only the round length is being changed
    pub fn only_cards_per_round(&self) -> bool {
        self.operations.is_none()
            && self.numbers.is_none()
            && self.pairing.is_none()
            && self.cards_per_round.is_some()
    }

    /// Fill missing fields from the configured defaults.
    pub fn resolve(self, config: &QuizConfig) -> QuizResult<QuizSettings> {
        let fallback = QuizSettings {
            operations: config.default_operations.clone(),
            numbers: config.default_numbers.clone(),
            pairing: config.default_pairing,
            cards_per_round: config.default_cards_per_round,
        };
        self.resolve_over(fallback, config)
    }

    /// Reject provided fields that exceed the configured limits.
    pub fn check_limits(&self, config: &QuizConfig) -> QuizResult<()> {
        if let Some(numbers) = &self.numbers {
            let distinct: BTreeSet<u32> = numbers.iter().copied().collect();
            if distinct.len() > config.max_selected_numbers {
                return Err(QuizError::invalid_config(format!(
                    "at most {} numbers may be selected",
                    config.max_selected_numbers
                )));
            }
        }
        if let Some(Pairing::TimesTable { max_factor }) = self.pairing {
            if max_factor > config.max_times_table_factor {
                return Err(QuizError::invalid_config(format!(
                    "times table factor must not exceed {}",
                    config.max_times_table_factor
                )));
            }
        }
        if let Some(cards) = self.cards_per_round {
            if cards > config.max_cards_per_round {
                return Err(QuizError::invalid_config(format!(
                    "cards per round must not exceed {}",
                    config.max_cards_per_round
                )));
            }
        }
        Ok(())
    }

    /// Fill missing fields from `current`.
    pub fn resolve_over(self, current: QuizSettings, config: &QuizConfig) -> QuizResult<QuizSettings> {
        self.check_limits(config)?;

        Ok(QuizSettings {
            operations: self
                .operations
                .map(|ops| ops.into_iter().collect())
                .unwrap_or(current.operations),
            numbers: self
                .numbers
                .map(|numbers| numbers.into_iter().collect())
                .unwrap_or(current.numbers),
            pairing: self.pairing.unwrap_or(current.pairing),
            cards_per_round: self.cards_per_round.unwrap_or(current.cards_per_round),
        })
    }
}
