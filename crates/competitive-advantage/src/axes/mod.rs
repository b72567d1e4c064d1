//! Independent competitive-advantage axes.
//!
//! Each axis reads the annual, date-ordered history and returns an optional
//! 0-100 score with the metadata it was computed from. Axes never see each
//! other; weighting happens in the combiner.

pub mod capital_discipline;
pub mod operating_stability;
pub mod return_persistence;

use serde::{Deserialize, Serialize};

pub use capital_discipline::{capital_discipline, CapitalDiscipline};
pub use operating_stability::operating_stability;
pub use return_persistence::return_persistence;

/// Percentage-point comparisons tolerate float noise from fraction inputs.
pub(crate) const PP_TOLERANCE: f64 = 1e-9;

/// Score of a single axis plus how many periods fed it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisOutcome {
    pub score: Option<f64>,
    pub periods: usize,
}

impl AxisOutcome {
    pub fn absent(periods: usize) -> Self {
        Self {
            score: None,
            periods,
        }
    }
}

/// The three axis scores, each `None` when the history cannot support it
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CompetitiveAdvantageAxes {
    pub return_persistence: Option<f64>,
    pub operating_stability: Option<f64>,
    pub capital_discipline: Option<f64>,
}
