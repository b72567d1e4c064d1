use scoring_core::stats::{clamp_score, growth_rate, std_dev};

use super::{AxisOutcome, PP_TOLERANCE};
use crate::CompetitiveAdvantageHistoryRow;

/// Revenue growth that qualifies a year as a growth episode
const GROWTH_EPISODE_MIN: f64 = 0.05;
/// Margin drop (pp) that makes a growth episode incoherent
const MARGIN_DROP_PP: f64 = 1.0;

/// How steady margins are, and whether growth came without margin erosion.
///
/// Margin is operating margin, falling back to net margin. Needs at least two
/// periods with a margin.
pub fn operating_stability(rows: &[&CompetitiveAdvantageHistoryRow]) -> AxisOutcome {
    let usable: Vec<(&CompetitiveAdvantageHistoryRow, f64)> = rows
        .iter()
        .filter_map(|row| row.margin().map(|m| (*row, m * 100.0)))
        .collect();

    if usable.len() < 2 {
        tracing::debug!("Operating stability: {} usable margin periods", usable.len());
        return AxisOutcome::absent(usable.len());
    }

    let margins_pct: Vec<f64> = usable.iter().map(|(_, m)| *m).collect();
    let stability = clamp_score(100.0 - 2.0 * std_dev(&margins_pct));

    let mut episodes = 0usize;
    let mut bad_episodes = 0usize;
    for pair in usable.windows(2) {
        let (prev_row, prev_margin) = pair[0];
        let (cur_row, cur_margin) = pair[1];
        let growth = match (prev_row.revenue(), cur_row.revenue()) {
            (Some(prev), Some(cur)) => growth_rate(prev, cur),
            _ => None,
        };
        if !growth.map_or(false, |g| g >= GROWTH_EPISODE_MIN - PP_TOLERANCE) {
            continue;
        }
        episodes += 1;
        if prev_margin - cur_margin >= MARGIN_DROP_PP - PP_TOLERANCE {
            bad_episodes += 1;
        }
    }

    let coherence = if episodes > 0 {
        100.0 * (1.0 - bad_episodes as f64 / episodes as f64)
    } else {
        stability
    };

    let drawdown_penalty = clamp_score(2.0 * max_drawdown(&margins_pct));

    let score = clamp_score(0.50 * stability + 0.30 * coherence - 0.20 * drawdown_penalty);
    tracing::trace!(
        "Operating stability: stability={:.1} coherence={:.1} ({} of {} episodes bad) drawdown_penalty={:.1} -> {:.1}",
        stability,
        coherence,
        bad_episodes,
        episodes,
        drawdown_penalty,
        score
    );

    AxisOutcome {
        score: Some(score),
        periods: usable.len(),
    }
}

/// Largest peak-to-trough fall across the sequence, in the sequence's units.
pub fn max_drawdown(values: &[f64]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut worst = 0.0_f64;
    for &value in values {
        peak = peak.max(value);
        worst = worst.max(peak - value);
    }
    worst
}
