use scoring_core::stats::{clamp_score, finite};

use crate::CompetitiveAdvantageAxes;

pub const RETURN_PERSISTENCE_WEIGHT: f64 = 0.5;
pub const OPERATING_STABILITY_WEIGHT: f64 = 0.3;
pub const CAPITAL_DISCIPLINE_WEIGHT: f64 = 0.2;

/// Headroom the combined score may have over return persistence
pub const RETURN_PERSISTENCE_HEADROOM: f64 = 20.0;

/// Weighted average of the present axes, renormalized over their weights.
///
/// When return persistence is known the result never exceeds it by more than
/// 20 points. `None` if no axis produced a score.
pub fn combine_axes(axes: &CompetitiveAdvantageAxes) -> Option<f64> {
    let weighted: Vec<(f64, f64)> = [
        (axes.return_persistence, RETURN_PERSISTENCE_WEIGHT),
        (axes.operating_stability, OPERATING_STABILITY_WEIGHT),
        (axes.capital_discipline, CAPITAL_DISCIPLINE_WEIGHT),
    ]
    .into_iter()
    .filter_map(|(score, weight)| finite(score).map(|s| (s, weight)))
    .collect();

    if weighted.is_empty() {
        return None;
    }

    let total_weight: f64 = weighted.iter().map(|(_, w)| w).sum();
    let mut combined = weighted.iter().map(|(s, w)| s * w).sum::<f64>() / total_weight;

    if let Some(persistence) = finite(axes.return_persistence) {
        combined = combined.min(persistence + RETURN_PERSISTENCE_HEADROOM);
    }

    Some(clamp_score(combined))
}
