//! Competitive-advantage scoring.
//!
//! Scores the durability of a business from its multi-year fundamentals on
//! three independent axes (return persistence, operating stability, capital
//! discipline) and folds them into one 0-100 score with a band and an
//! evidence-based confidence.

pub mod axes;
pub mod combiner;
pub mod history;


use serde::{Deserialize, Serialize};

pub use axes::{
    capital_discipline, operating_stability, return_persistence, AxisOutcome, CapitalDiscipline,
    CompetitiveAdvantageAxes,
};
pub use combiner::combine_axes;
pub use history::{annual_history, CompetitiveAdvantageHistoryRow, PeriodType};

/// Categorical reading of the combined score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompetitiveAdvantageBand {
    Weak,
    Defendable,
    Strong,
}

impl CompetitiveAdvantageBand {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s < 40.0 => CompetitiveAdvantageBand::Weak,
            s if s < 70.0 => CompetitiveAdvantageBand::Defendable,
            _ => CompetitiveAdvantageBand::Strong,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompetitiveAdvantageBand::Weak => "weak",
            CompetitiveAdvantageBand::Defendable => "defendable",
            CompetitiveAdvantageBand::Strong => "strong",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitiveAdvantageResult {
    pub score: Option<f64>,
    /// `None` exactly when `score` is `None`
    pub band: Option<CompetitiveAdvantageBand>,
    pub confidence: u8,
    pub axes: CompetitiveAdvantageAxes,
    /// Annual periods in the history
    pub years_analyzed: u32,
}

/// Score a company's competitive advantage from its fundamentals history.
///
/// Quarterly and TTM rows are ignored; the rest are sorted by period end
/// before scoring. Never fails: thin histories degrade to absent axes and
/// lower confidence.
pub fn score_competitive_advantage(
    history: &[CompetitiveAdvantageHistoryRow],
) -> CompetitiveAdvantageResult {
    let rows = annual_history(history);
    let years_analyzed = rows.len() as u32;

    let axes = CompetitiveAdvantageAxes {
        return_persistence: return_persistence(&rows).score,
        operating_stability: operating_stability(&rows).score,
        capital_discipline: capital_discipline(&rows).score,
    };

    let score = combine_axes(&axes);
    let band = score.map(CompetitiveAdvantageBand::from_score);
    let confidence = confidence_for_years(years_analyzed);

    tracing::debug!(
        "Competitive advantage: score={:?} band={:?} confidence={} years={} axes={:?}",
        score,
        band,
        confidence,
        years_analyzed,
        axes
    );

    CompetitiveAdvantageResult {
        score,
        band,
        confidence,
        axes,
        years_analyzed,
    }
}

/// Confidence from the depth of the annual history alone.
pub fn confidence_for_years(years: u32) -> u8 {
    match years {
        y if y >= 10 => 90,
        y if y >= 8 => 80,
        y if y >= 5 => 70,
        y if y >= 3 => 50,
        y if y >= 1 => 30,
        _ => 0,
    }
}
