//! Collapse a projection table into an EPS-based and a cash-flow-based value
//! per share.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValuationError;
use crate::time_value::{capitalise, checked_sum};
use crate::types::Money;
use crate::EquityValuationResult;

use super::projection::ProjectionTable;

/// How the six projected years are reduced to a single value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryMode {
    /// Unweighted mean of the six years, capitalised as a no-growth
    /// perpetuity at the required return. Ignores timing.
    #[default]
    AverageBased,
    /// Sum of the per-year present values.
    DcfBased,
}

impl SummaryMode {
    pub fn name(&self) -> &'static str {
        match self {
            SummaryMode::AverageBased => "average-based",
            SummaryMode::DcfBased => "dcf-based",
        }
    }
}

impl fmt::Display for SummaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SummaryMode {
    type Err = ValuationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "average-based" | "average" | "avg" => Ok(SummaryMode::AverageBased),
            "dcf-based" | "dcf" => Ok(SummaryMode::DcfBased),
            _ => Err(ValuationError::InvalidInput {
                field: "mode".into(),
                reason: format!("Unknown summary mode '{s}'; expected average-based or dcf-based"),
            }),
        }
    }
}

/// EPS- and cash-flow-based value per share for one projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationSummary {
    pub mode: SummaryMode,
    pub eps_valuation: Money,
    pub cf_valuation: Money,
}

/// Reduce `table` to a [`ValuationSummary`].
///
/// Average-based divides by the table's required return, so a zero required
/// return is a division hazard in that mode only.
pub fn summarize_valuation(
    table: &ProjectionTable,
    mode: SummaryMode,
) -> EquityValuationResult<ValuationSummary> {
    let rows = table.rows();
    let (eps_valuation, cf_valuation) = match mode {
        SummaryMode::AverageBased => {
            let n = Decimal::from(rows.len() as u32);
            let mean_eps = checked_sum(rows.iter().map(|r| r.eps), "average-based summary")? / n;
            let mean_cf =
                checked_sum(rows.iter().map(|r| r.cf_per_share), "average-based summary")? / n;
            let r = table.required_return();
            (
                capitalise(mean_eps, r, "average-based summary")?,
                capitalise(mean_cf, r, "average-based summary")?,
            )
        }
        SummaryMode::DcfBased => (
            checked_sum(rows.iter().map(|r| r.pv_eps), "dcf-based summary")?,
            checked_sum(rows.iter().map(|r| r.pv_cf_per_share), "dcf-based summary")?,
        ),
    };

    log::debug!(
        "{mode} summary for {}: eps={eps_valuation} cf={cf_valuation}",
        table.method()
    );

    Ok(ValuationSummary {
        mode,
        eps_valuation,
        cf_valuation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depreciation::projection::{project_depreciation_impact, ProjectionAssumptions};
    use crate::depreciation::schedule::DepreciationMethod;
    use rust_decimal_macros::dec;

    fn approx_eq(a: Decimal, b: Decimal, eps: Decimal) -> bool {
        (a - b).abs() < eps
    }

    fn table(method: DepreciationMethod) -> ProjectionTable {
        project_depreciation_impact(&method.schedule(), &ProjectionAssumptions::default()).unwrap()
    }

    #[test]
    fn test_dcf_mode_sums_present_values() {
        let t = table(DepreciationMethod::StraightLine);
        let s = summarize_valuation(&t, SummaryMode::DcfBased).unwrap();
        let pv_eps: Money = t.rows().iter().map(|r| r.pv_eps).sum();
        let pv_cf: Money = t.rows().iter().map(|r| r.pv_cf_per_share).sum();
        assert_eq!(s.eps_valuation, pv_eps);
        assert_eq!(s.cf_valuation, pv_cf);
        assert!(approx_eq(s.eps_valuation, dec!(9.404458), dec!(0.00001)));
        assert!(approx_eq(s.cf_valuation, dec!(12.307967), dec!(0.00001)));
    }

    #[test]
    fn test_average_mode_capitalises_mean() {
        let t = table(DepreciationMethod::StraightLine);
        let s = summarize_valuation(&t, SummaryMode::AverageBased).unwrap();
        // mean EPS 2.15933307 / 0.10
        assert!(approx_eq(s.eps_valuation, dec!(21.5933307), dec!(0.0000001)));
        assert!(approx_eq(s.cf_valuation, dec!(28.2600007), dec!(0.0000001)));
    }

    #[test]
    fn test_modes_disagree() {
        let t = table(DepreciationMethod::Macrs3Year);
        let avg = summarize_valuation(&t, SummaryMode::AverageBased).unwrap();
        let dcf = summarize_valuation(&t, SummaryMode::DcfBased).unwrap();
        assert_ne!(avg.eps_valuation, dcf.eps_valuation);
        assert_ne!(avg.cf_valuation, dcf.cf_valuation);
    }

    #[test]
    fn test_average_mode_ignores_timing() {
        // Both MACRS schedules depreciate 40,000 in total, so their means match
        let m3 = summarize_valuation(&table(DepreciationMethod::Macrs3Year), SummaryMode::AverageBased)
            .unwrap();
        let m5 = summarize_valuation(&table(DepreciationMethod::Macrs5Year), SummaryMode::AverageBased)
            .unwrap();
        assert!(approx_eq(m3.cf_valuation, m5.cf_valuation, dec!(0.0000001)));
        assert!(approx_eq(m3.cf_valuation, dec!(28.26), dec!(0.0000001)));
    }

    #[test]
    fn test_dcf_mode_rewards_accelerated_depreciation() {
        let m3 = summarize_valuation(&table(DepreciationMethod::Macrs3Year), SummaryMode::DcfBased)
            .unwrap();
        let m5 = summarize_valuation(&table(DepreciationMethod::Macrs5Year), SummaryMode::DcfBased)
            .unwrap();
        assert!(m3.cf_valuation > m5.cf_valuation);
        assert!(m3.eps_valuation < m5.eps_valuation);
    }

    #[test]
    fn test_average_mode_zero_required_return_is_hazard() {
        let assumptions = ProjectionAssumptions {
            required_return: Decimal::ZERO,
            ..Default::default()
        };
        let t = project_depreciation_impact(&DepreciationMethod::StraightLine.schedule(), &assumptions)
            .unwrap();
        let err = summarize_valuation(&t, SummaryMode::AverageBased).unwrap_err();
        assert!(err.is_division_hazard());
        // DCF mode is still fine: undiscounted sum
        assert!(summarize_valuation(&t, SummaryMode::DcfBased).is_ok());
    }

    #[test]
    fn test_mode_from_str_and_serde() {
        assert_eq!("dcf".parse::<SummaryMode>().unwrap(), SummaryMode::DcfBased);
        assert_eq!("Average-Based".parse::<SummaryMode>().unwrap(), SummaryMode::AverageBased);
        assert!("median".parse::<SummaryMode>().is_err());
        assert_eq!(serde_json::to_string(&SummaryMode::DcfBased).unwrap(), "\"dcf-based\"");
    }
}
