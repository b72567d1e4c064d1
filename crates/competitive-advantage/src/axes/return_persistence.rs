use scoring_core::stats::{clamp_score, mean, std_dev};

use super::AxisOutcome;
use crate::CompetitiveAdvantageHistoryRow;

/// Returns below this level (in %) count as a failed year
const FAILURE_THRESHOLD_PCT: f64 = 5.0;

/// How high and how steady returns on capital have been.
///
/// Uses ROIC per row, falling back to ROE; rows with neither are skipped.
pub fn return_persistence(rows: &[&CompetitiveAdvantageHistoryRow]) -> AxisOutcome {
    let returns_pct: Vec<f64> = rows
        .iter()
        .filter_map(|row| row.return_metric())
        .map(|r| r * 100.0)
        .collect();

    let years = returns_pct.len();
    if years == 0 {
        tracing::debug!("Return persistence: no ROIC/ROE data");
        return AxisOutcome::absent(0);
    }

    let level = level_score(mean(&returns_pct));
    let stability = clamp_score(100.0 - 2.0 * std_dev(&returns_pct));
    let failures = returns_pct
        .iter()
        .filter(|&&r| r < FAILURE_THRESHOLD_PCT)
        .count();
    let failure_penalty = clamp_score(failures as f64 / years as f64 * 100.0);

    let score = clamp_score(0.30 * level + 0.45 * stability - 0.25 * failure_penalty);
    tracing::trace!(
        "Return persistence: level={:.1} stability={:.1} failure_penalty={:.1} -> {:.1}",
        level,
        stability,
        failure_penalty,
        score
    );

    AxisOutcome {
        score: Some(score),
        periods: years,
    }
}

/// Piecewise-linear map of a mean return (in %) onto 0-100.
pub fn level_score(pct: f64) -> f64 {
    let raw = if pct <= 0.0 {
        0.0
    } else if pct <= 10.0 {
        pct * 4.0
    } else if pct <= 20.0 {
        40.0 + (pct - 10.0) * 2.0
    } else if pct <= 40.0 {
        60.0 + (pct - 20.0)
    } else {
        80.0 + (pct - 40.0) * 0.5
    };
    clamp_score(raw)
}
