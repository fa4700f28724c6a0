//! Application Configuration
//!
//! Defaults and limits for the quiz application layer.

use std::collections::BTreeSet;
use std::time::Duration;

use crate::domain::value_objects::{Operation, Pairing};

/// Quiz application configuration
#[derive(Debug, Clone)]
pub struct QuizConfig {
    /// Operations selected when a request names none
    pub default_operations: BTreeSet<Operation>,
    /// Numbers selected when a request names none
    pub default_numbers: BTreeSet<u32>,
    /// Pairing used when a request names none
    pub default_pairing: Pairing,
    /// Round length when a request names none
    pub default_cards_per_round: usize,
    /// Round sizes offered to the player
    pub card_presets: Vec<usize>,
    /// Upper bound on how many numbers one selection may hold
    pub max_selected_numbers: usize,
    /// Upper bound on a times-table factor
    pub max_times_table_factor: u32,
    /// Upper bound on a round's length
    pub max_cards_per_round: usize,
    /// Sessions untouched for longer than this are swept
    pub session_idle_ttl: Duration,
    /// How often the sweeper runs
    pub sweep_interval: Duration,
    /// Upper bound on live sessions
    pub max_sessions: usize,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            default_operations: BTreeSet::from([Operation::Multiplication]),
            default_numbers: (1..=8).collect(),
            default_pairing: Pairing::Selection,
            default_cards_per_round: 10,
            card_presets: vec![5, 10, 15, 20, 25],
            max_selected_numbers: 100,
            max_times_table_factor: 20,
            max_cards_per_round: 25,
            session_idle_ttl: Duration::from_secs(3600),
            sweep_interval: Duration::from_secs(300),
            max_sessions: 10_000,
        }
    }
}
