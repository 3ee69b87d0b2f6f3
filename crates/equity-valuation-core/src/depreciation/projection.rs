//! Six-year EPS and cash-flow-per-share projection under a depreciation
//! schedule.
//!
//! Per year i (1..=6):
//!   gross profit = sales × (1 - COGS%)
//!   SG&A         = gross profit × SG&A%
//!   EBIT         = gross profit - SG&A - depreciation_i
//!   net income   = EBIT × (1 - tax)
//!   EPS          = net income / shares
//!   CF/share     = (net income + depreciation_i) / shares
//!   PV_x         = x / (1 + r)^i
//!
//! Depreciation lowers EPS but is added back to cash flow, so the schedule
//! only shifts the timing of the tax shield.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::ValuationError;
use crate::time_value::{compound_factor, discount, overflow, per_share};
use crate::types::{Money, Rate, Shares};
use crate::EquityValuationResult;

use super::schedule::DepreciationSchedule;
use super::PROJECTION_YEARS;

// ---------------------------------------------------------------------------
// Assumptions
// ---------------------------------------------------------------------------

/// Operating assumptions held flat across the projection. Missing fields
/// deserialize to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionAssumptions {
    /// Annual sales, flat every year
    pub sales: Money,
    /// Cost of goods sold as a fraction of sales
    pub cogs_pct: Rate,
    /// SG&A as a fraction of gross profit
    pub sgna_pct: Rate,
    pub tax_rate: Rate,
    pub shares: Shares,
    /// Discount rate for the per-year present values and the perpetuity summary
    pub required_return: Rate,
}

impl Default for ProjectionAssumptions {
    fn default() -> Self {
        ProjectionAssumptions {
            sales: dec!(100000),
            cogs_pct: dec!(0.60),
            sgna_pct: dec!(0.15),
            tax_rate: dec!(0.21),
            shares: dec!(10000),
            required_return: dec!(0.10),
        }
    }
}

impl ProjectionAssumptions {
    pub fn validate(&self) -> EquityValuationResult<()> {
        if self.sales < Decimal::ZERO {
            return Err(invalid("sales", "Sales must be non-negative"));
        }
        for (field, value) in [
            ("cogs_pct", self.cogs_pct),
            ("sgna_pct", self.sgna_pct),
            ("tax_rate", self.tax_rate),
        ] {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(invalid(field, "Must be between 0 and 1"));
            }
        }
        if self.shares <= Decimal::ZERO {
            return Err(invalid("shares", "Share count must be positive"));
        }
        if self.required_return <= dec!(-1) {
            return Err(invalid(
                "required_return",
                "Required return must be greater than -100%",
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ValuationError {
    ValuationError::InvalidInput {
        field: field.into(),
        reason: reason.into(),
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// One projected year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyProjection {
    pub year: u32,
    pub depreciation: Money,
    pub ebit: Money,
    pub net_income: Money,
    pub eps: Money,
    pub cf_per_share: Money,
    /// (1 + r)^year
    pub discount_factor: Decimal,
    pub pv_eps: Money,
    pub pv_cf_per_share: Money,
}

/// Six projected years in ascending order. Only [`project_depreciation_impact`]
/// constructs one, so the length and ordering always hold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionTable {
    method: String,
    required_return: Rate,
    rows: [YearlyProjection; PROJECTION_YEARS],
}

impl ProjectionTable {
    /// Name of the schedule the table was projected under.
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn required_return(&self) -> Rate {
        self.required_return
    }

    pub fn rows(&self) -> &[YearlyProjection; PROJECTION_YEARS] {
        &self.rows
    }

    /// `(year, EPS)` points for charting.
    pub fn eps_series(&self) -> Vec<(u32, Money)> {
        self.rows.iter().map(|r| (r.year, r.eps)).collect()
    }

    /// `(year, CF per share)` points for charting.
    pub fn cf_series(&self) -> Vec<(u32, Money)> {
        self.rows.iter().map(|r| (r.year, r.cf_per_share)).collect()
    }
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Project EPS and cash flow per share for each year of `schedule`.
pub fn project_depreciation_impact(
    schedule: &DepreciationSchedule,
    assumptions: &ProjectionAssumptions,
) -> EquityValuationResult<ProjectionTable> {
    assumptions.validate()?;

    let gross_profit = assumptions.sales * (Decimal::ONE - assumptions.cogs_pct);
    let sgna = gross_profit * assumptions.sgna_pct;
    let after_tax = Decimal::ONE - assumptions.tax_rate;

    let rows: Vec<YearlyProjection> = schedule
        .amounts()
        .iter()
        .enumerate()
        .map(|(idx, &depreciation)| -> EquityValuationResult<YearlyProjection> {
            let year = idx as u32 + 1;
            let ebit = gross_profit - sgna - depreciation;
            let net_income = ebit * after_tax;
            let eps = per_share(net_income, assumptions.shares, "EPS")?;
            let cash_flow = net_income
                .checked_add(depreciation)
                .ok_or_else(|| overflow("CF per share"))?;
            let cf_per_share = per_share(cash_flow, assumptions.shares, "CF per share")?;
            let discount_factor = compound_factor(assumptions.required_return, year)?;
            Ok(YearlyProjection {
                year,
                depreciation,
                ebit,
                net_income,
                eps,
                cf_per_share,
                discount_factor,
                pv_eps: discount(eps, discount_factor, "present value of EPS")?,
                pv_cf_per_share: discount(cf_per_share, discount_factor, "present value of CF")?,
            })
        })
        .collect::<EquityValuationResult<_>>()?;

    let rows: [YearlyProjection; PROJECTION_YEARS] = rows.try_into().map_err(|_| {
        invalid("schedule", "Projection must cover exactly six years")
    })?;

    log::debug!(
        "projected {} years under {} at r={}",
        PROJECTION_YEARS,
        schedule.name(),
        assumptions.required_return
    );

    Ok(ProjectionTable {
        method: schedule.name().to_string(),
        required_return: assumptions.required_return,
        rows,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depreciation::schedule::DepreciationMethod;

    fn approx_eq(a: Decimal, b: Decimal, eps: Decimal) -> bool {
        (a - b).abs() < eps
    }

    fn project(method: DepreciationMethod) -> ProjectionTable {
        project_depreciation_impact(&method.schedule(), &ProjectionAssumptions::default()).unwrap()
    }

    #[test]
    fn test_six_rows_ascending() {
        for method in DepreciationMethod::ALL {
            let table = project(method);
            let years: Vec<u32> = table.rows().iter().map(|r| r.year).collect();
            assert_eq!(years, vec![1, 2, 3, 4, 5, 6]);
            assert_eq!(table.method(), method.name());
        }
    }

    #[test]
    fn test_macrs3_year_one() {
        let table = project(DepreciationMethod::Macrs3Year);
        let y1 = &table.rows()[0];
        // GP 40,000; SG&A 6,000; EBIT 34,000 - 13,200 = 20,800
        assert_eq!(y1.ebit, dec!(20800));
        // NI = 20,800 * 0.79 = 16,432
        assert_eq!(y1.net_income, dec!(16432));
        assert_eq!(y1.eps, dec!(1.6432));
        assert_eq!(y1.cf_per_share, dec!(2.9632));
        assert_eq!(y1.discount_factor, dec!(1.1));
        assert!(approx_eq(y1.pv_eps, dec!(1.4938182), dec!(0.000001)));
    }

    #[test]
    fn test_zero_depreciation_years() {
        let table = project(DepreciationMethod::Macrs3Year);
        let y6 = &table.rows()[5];
        // EBIT 34,000 * 0.79 = 26,860 → EPS = CF/share = 2.686
        assert_eq!(y6.eps, dec!(2.686));
        assert_eq!(y6.cf_per_share, y6.eps);
        assert_eq!(y6.discount_factor, dec!(1.771561));
    }

    #[test]
    fn test_straight_line_constant_rows() {
        let table = project(DepreciationMethod::StraightLine);
        for row in table.rows() {
            assert_eq!(row.depreciation, dec!(6666.67));
            assert_eq!(row.eps, dec!(2.15933307));
            assert_eq!(row.cf_per_share, dec!(2.82600007));
        }
    }

    #[test]
    fn test_present_values_decline() {
        let table = project(DepreciationMethod::StraightLine);
        for pair in table.rows().windows(2) {
            assert!(pair[1].pv_eps < pair[0].pv_eps);
            assert!(pair[1].pv_cf_per_share < pair[0].pv_cf_per_share);
        }
    }

    #[test]
    fn test_series_for_charting() {
        let table = project(DepreciationMethod::Macrs5Year);
        let eps = table.eps_series();
        let cf = table.cf_series();
        assert_eq!(eps.len(), 6);
        assert_eq!(eps[0], (1, dec!(2.054)));
        assert_eq!(cf[0], (1, dec!(2.854)));
    }

    #[test]
    fn test_custom_assumptions() {
        let assumptions = ProjectionAssumptions {
            tax_rate: Decimal::ZERO,
            required_return: Decimal::ZERO,
            ..Default::default()
        };
        let table =
            project_depreciation_impact(&DepreciationMethod::Macrs3Year.schedule(), &assumptions)
                .unwrap();
        // No tax shield: cash flow per share is flat at 3.4 regardless of schedule
        assert!(table.rows().iter().all(|r| r.cf_per_share == dec!(3.4)));
        assert!(table.rows().iter().all(|r| r.pv_eps == r.eps));
    }

    #[test]
    fn test_near_total_loss_rate_errors_without_panicking() {
        let assumptions = ProjectionAssumptions {
            sales: dec!(1000000000000000000000000),
            required_return: dec!(-0.9999999999),
            ..Default::default()
        };
        let schedule = DepreciationMethod::Macrs5Year.schedule();
        assert!(project_depreciation_impact(&schedule, &assumptions).is_err());
    }

    #[test]
    fn test_rejects_zero_shares() {
        let assumptions = ProjectionAssumptions {
            shares: Decimal::ZERO,
            ..Default::default()
        };
        let schedule = DepreciationMethod::StraightLine.schedule();
        let err = project_depreciation_impact(&schedule, &assumptions).unwrap_err();
        assert!(matches!(err, ValuationError::InvalidInput { ref field, .. } if field == "shares"));
    }

    #[test]
    fn test_rejects_out_of_range_tax() {
        let assumptions = ProjectionAssumptions {
            tax_rate: dec!(1.5),
            ..Default::default()
        };
        assert!(assumptions.validate().is_err());
    }

    #[test]
    fn test_partial_assumptions_deserialize_with_defaults() {
        let a: ProjectionAssumptions = serde_json::from_str(r#"{"tax_rate": "0.25"}"#).unwrap();
        assert_eq!(a.tax_rate, dec!(0.25));
        assert_eq!(a.sales, dec!(100000));
        assert_eq!(a.required_return, dec!(0.10));
    }

    #[test]
    fn test_projection_is_idempotent() {
        let a = project(DepreciationMethod::Macrs5Year);
        let b = project(DepreciationMethod::Macrs5Year);
        assert_eq!(a, b);
    }
}
