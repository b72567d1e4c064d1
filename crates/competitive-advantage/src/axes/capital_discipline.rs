use scoring_core::stats::{clamp, clamp_score, growth_rate, mean};
use serde::{Deserialize, Serialize};

use super::PP_TOLERANCE;
use crate::CompetitiveAdvantageHistoryRow;

/// Invested-capital growth that counts as a reinvestment event
const REINVESTMENT_GROWTH_MIN: f64 = 0.05;
/// Return decline (pp) tolerated after reinvesting
const REINVESTMENT_RETURN_SLACK_PP: f64 = 1.0;
/// Share-count growth that counts as dilution
const DILUTION_GROWTH_MIN: f64 = 0.01;
/// Single-year dilution is discounted to this share of its penalty
const SINGLE_YEAR_DILUTION_FACTOR: f64 = 0.4;
/// Bound on the revenue-minus-capital growth spread
const EFFICIENCY_SPREAD_CAP: f64 = 0.3;
/// Neutral value for a sub-measure with no qualifying events
const NEUTRAL: f64 = 50.0;

/// Capital-discipline axis and the sub-measures it was built from
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CapitalDiscipline {
    pub score: Option<f64>,
    /// Share of reinvestment events that kept returns intact (0-100)
    pub reinvestment: Option<f64>,
    pub reinvestment_events: usize,
    /// Penalty for share-count creep (0-100)
    pub dilution_penalty: Option<f64>,
    pub dilution_years: usize,
    /// Revenue growth vs. invested-capital growth (0-100, 50 = parity)
    pub efficiency: Option<f64>,
    pub efficiency_pairs: usize,
}

/// Whether growth capital earns its keep and shareholders are not diluted.
///
/// Walks consecutive periods; every sub-measure is evaluated independently on
/// each pair. Needs at least two periods.
pub fn capital_discipline(rows: &[&CompetitiveAdvantageHistoryRow]) -> CapitalDiscipline {
    if rows.len() < 2 {
        tracing::debug!("Capital discipline: {} periods, need 2", rows.len());
        return CapitalDiscipline::default();
    }

    let mut positive_events = 0usize;
    let mut negative_events = 0usize;
    let mut dilution_growth = Vec::new();
    let mut efficiency_spreads = Vec::new();

    for pair in rows.windows(2) {
        let (prev, cur) = (pair[0], pair[1]);
        let capital_growth = pair_growth(prev.invested_capital(), cur.invested_capital());

        if let (Some(growth), Some(prev_return), Some(cur_return)) =
            (capital_growth, prev.return_metric(), cur.return_metric())
        {
            if growth > REINVESTMENT_GROWTH_MIN {
                let change_pp = (cur_return - prev_return) * 100.0;
                if change_pp >= -REINVESTMENT_RETURN_SLACK_PP - PP_TOLERANCE {
                    positive_events += 1;
                } else {
                    negative_events += 1;
                }
            }
        }

        if let Some(growth) = pair_growth(prev.weighted_shares_out(), cur.weighted_shares_out()) {
            if growth > DILUTION_GROWTH_MIN {
                dilution_growth.push(growth);
            }
        }

        if let (Some(revenue_growth), Some(capital_growth)) =
            (pair_growth(prev.revenue(), cur.revenue()), capital_growth)
        {
            efficiency_spreads.push(revenue_growth - capital_growth);
        }
    }

    let reinvestment_events = positive_events + negative_events;
    let reinvestment = (reinvestment_events > 0)
        .then(|| 100.0 * positive_events as f64 / reinvestment_events as f64);

    let dilution_penalty = (!dilution_growth.is_empty()).then(|| {
        let total: f64 = dilution_growth.iter().sum();
        let penalty = clamp_score(total.min(1.0) * 100.0);
        if dilution_growth.len() == 1 {
            penalty * SINGLE_YEAR_DILUTION_FACTOR
        } else {
            penalty
        }
    });

    let efficiency = (!efficiency_spreads.is_empty()).then(|| {
        let spread = clamp(
            mean(&efficiency_spreads),
            -EFFICIENCY_SPREAD_CAP,
            EFFICIENCY_SPREAD_CAP,
        );
        clamp_score(NEUTRAL + spread * 250.0)
    });

    let score = if reinvestment.is_none() && dilution_penalty.is_none() && efficiency.is_none() {
        tracing::debug!("Capital discipline: no qualifying events");
        None
    } else {
        Some(clamp_score(
            0.40 * reinvestment.unwrap_or(NEUTRAL) - 0.35 * dilution_penalty.unwrap_or(0.0)
                + 0.25 * efficiency.unwrap_or(NEUTRAL),
        ))
    };

    tracing::trace!(
        "Capital discipline: reinvestment={:?} dilution_penalty={:?} efficiency={:?} -> {:?}",
        reinvestment,
        dilution_penalty,
        efficiency,
        score
    );

    CapitalDiscipline {
        score,
        reinvestment,
        reinvestment_events,
        dilution_penalty,
        dilution_years: dilution_growth.len(),
        efficiency,
        efficiency_pairs: efficiency_spreads.len(),
    }
}

fn pair_growth(previous: Option<f64>, current: Option<f64>) -> Option<f64> {
    match (previous, current) {
        (Some(prev), Some(cur)) => growth_rate(prev, cur),
        _ => None,
    }
}
