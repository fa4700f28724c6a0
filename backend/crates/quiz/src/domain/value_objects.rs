//! Domain Value Objects
//!
//! Immutable value types for the quiz domain.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// Operation
// ============================================================================

/// Arithmetic operation a flash card can practise.
///
/// The declaration order is also the sort order of questions in a pool.
/// Serialized by name; deserialized through [`FromStr`], so names in any
/// case and card symbols are both accepted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[serde(try_from = "String")]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl Operation {
    /// Every supported operation, in display order.
    pub const ALL: [Operation; 4] = [
        Operation::Addition,
        Operation::Subtraction,
        Operation::Multiplication,
        Operation::Division,
    ];

    /// Symbol shown on the card face
    #[inline]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Addition => "+",
            Self::Subtraction => "-",
            Self::Multiplication => "x",
            Self::Division => "÷",
        }
    }

    /// Operation for a card-face symbol (`*` and `/` accepted as aliases)
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Addition),
            "-" => Some(Self::Subtraction),
            "x" | "*" => Some(Self::Multiplication),
            "÷" | "/" => Some(Self::Division),
            _ => None,
        }
    }
}

/// Error for an unknown operation name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operation: {0}")]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|op| op.to_string().eq_ignore_ascii_case(trimmed))
            .or_else(|| Self::from_symbol(trimmed))
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}

impl TryFrom<String> for Operation {
    type Error = UnknownOperation;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ============================================================================
// Pairing
// ============================================================================

/// How operand pairs are drawn from the selected numbers.
///
/// - `Selection` pairs the selected numbers with each other (unordered,
///   self-pairs included). `{1, 2}` gives `(1,1) (1,2) (2,2)`.
/// - `TimesTable` pairs every selected number with each factor
///   `1..=max_factor`, the classic "times table of 7" drill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum Pairing {
    #[default]
    Selection,
    TimesTable {
        #[serde(rename = "maxFactor", default = "default_max_factor")]
        max_factor: u32,
    },
}

/// Factor range of the classic times table
pub const DEFAULT_MAX_FACTOR: u32 = 12;

fn default_max_factor() -> u32 {
    DEFAULT_MAX_FACTOR
}

impl Pairing {
    /// `TimesTable` up to 12
    pub const fn times_table() -> Self {
        Pairing::TimesTable {
            max_factor: DEFAULT_MAX_FACTOR,
        }
    }

    /// Operand pairs for the given numbers.
    ///
    /// Callers pass numbers ascending and deduplicated (a `BTreeSet` walk);
    /// `Selection` relies on that to emit each unordered pair once.
    pub fn pairs(&self, numbers: impl IntoIterator<Item = u32>) -> Vec<(u32, u32)> {
        match *self {
            Pairing::Selection => {
                let sorted: Vec<u32> = numbers.into_iter().collect();
                let mut pairs = Vec::with_capacity(sorted.len() * (sorted.len() + 1) / 2);
                for (i, &a) in sorted.iter().enumerate() {
                    for &b in &sorted[i..] {
                        pairs.push((a, b));
                    }
                }
                pairs
            }
            Pairing::TimesTable { max_factor } => numbers
                .into_iter()
                .flat_map(|first| (1..=max_factor).map(move |second| (first, second)))
                .collect(),
        }
    }
}

// ============================================================================
// Phase
// ============================================================================

/// Lifecycle phase of a quiz session.
///
/// `Configuring -> InProgress -> Finished`; the only way back is a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    #[display("configuring")]
    Configuring,
    #[display("in progress")]
    InProgress,
    #[display("finished")]
    Finished,
}

impl Phase {
    #[inline]
    pub const fn is_configuring(&self) -> bool {
        matches!(self, Self::Configuring)
    }

    #[inline]
    pub const fn is_in_progress(&self) -> bool {
        matches!(self, Self::InProgress)
    }

    #[inline]
    pub const fn is_finished(&self) -> bool {
        matches!(self, Self::Finished)
    }
}
