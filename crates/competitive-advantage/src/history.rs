use chrono::NaiveDate;
use scoring_core::coerce::lenient_f64;
use scoring_core::stats::finite;
use serde::{Deserialize, Serialize};

/// Reporting period tag on a fundamentals row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodType {
    #[serde(rename = "FY", alias = "fy")]
    FiscalYear,
    #[serde(rename = "Q", alias = "q")]
    Quarter,
    #[serde(rename = "TTM", alias = "ttm")]
    TrailingTwelveMonths,
    #[serde(other)]
    Other,
}

/// One fiscal period of fundamentals.
///
/// Ratios (`roic`, `roe`, margins) are fractions: `0.20` means 20%.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitiveAdvantageHistoryRow {
    pub period_end_date: NaiveDate,
    #[serde(default)]
    pub period_type: Option<PeriodType>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub roic: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub roe: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub operating_margin: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub net_margin: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub revenue: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub invested_capital: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub free_cash_flow: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub capex: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub weighted_shares_out: Option<f64>,
}

impl CompetitiveAdvantageHistoryRow {
    /// Row with no period tag and no data
    pub fn new(period_end_date: NaiveDate) -> Self {
        Self {
            period_end_date,
            period_type: None,
            roic: None,
            roe: None,
            operating_margin: None,
            net_margin: None,
            revenue: None,
            invested_capital: None,
            free_cash_flow: None,
            capex: None,
            weighted_shares_out: None,
        }
    }

    /// Untagged rows are presumed annual.
    pub fn is_annual(&self) -> bool {
        matches!(self.period_type, None | Some(PeriodType::FiscalYear))
    }

    /// ROIC, falling back to ROE
    pub fn return_metric(&self) -> Option<f64> {
        finite(self.roic).or_else(|| finite(self.roe))
    }

    /// Operating margin, falling back to net margin
    pub fn margin(&self) -> Option<f64> {
        finite(self.operating_margin).or_else(|| finite(self.net_margin))
    }

    pub fn revenue(&self) -> Option<f64> {
        finite(self.revenue)
    }

    pub fn invested_capital(&self) -> Option<f64> {
        finite(self.invested_capital)
    }

    pub fn weighted_shares_out(&self) -> Option<f64> {
        finite(self.weighted_shares_out)
    }
}

/// Annual rows (untagged or `FY`) in ascending period order.
pub fn annual_history(
    history: &[CompetitiveAdvantageHistoryRow],
) -> Vec<&CompetitiveAdvantageHistoryRow> {
    let mut rows: Vec<&CompetitiveAdvantageHistoryRow> =
        history.iter().filter(|row| row.is_annual()).collect();
    rows.sort_by_key(|row| row.period_end_date);
    rows
}
