//! Constant-growth Dividend Discount Model (Gordon growth).
//!
//! Formula:
//!   P = D₁ / (k - g)
//!
//! D₁ is next year's dividend, so no growth adjustment is applied to it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::time_value::gordon_growth_value;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::EquityValuationResult;

use super::inverted_spread_warning;

// ---------------------------------------------------------------------------
// Input / Output
// ---------------------------------------------------------------------------

/// Input for the constant-growth DDM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DdmInput {
    /// Next year's dividend per share (D₁).
    pub dividend: Money,
    /// Perpetual dividend growth rate (g).
    pub growth_rate: Rate,
    /// Cost of equity (k).
    pub cost_of_equity: Rate,
}

/// Output of the constant-growth DDM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DdmOutput {
    /// Intrinsic value per share.
    pub value_per_share: Money,
    /// k - g.
    pub spread: Rate,
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Value per share `D1 / (k - g)`.
///
/// `k == g` is a division hazard. `k < g` returns the negative arithmetic
/// value; use [`calculate_ddm`] or the batch valuation to have it flagged.
pub fn compute_ddm(
    dividend: Money,
    growth_rate: Rate,
    cost_of_equity: Rate,
) -> EquityValuationResult<Money> {
    let value = gordon_growth_value(
        dividend,
        cost_of_equity,
        growth_rate,
        "cost of equity",
        "DDM",
    )?;
    log::debug!("DDM: D1={dividend} g={growth_rate} k={cost_of_equity} -> {value}");
    Ok(value)
}

/// Run the DDM and wrap it in the standard output envelope.
pub fn calculate_ddm(input: &DdmInput) -> EquityValuationResult<ComputationOutput<DdmOutput>> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    let value_per_share = compute_ddm(input.dividend, input.growth_rate, input.cost_of_equity)?;
    if let Some(w) =
        inverted_spread_warning("DDM", "cost of equity", input.cost_of_equity, input.growth_rate)
    {
        log::warn!("{w}");
        warnings.push(w);
    }
    if input.dividend < Decimal::ZERO {
        warnings.push("DDM: dividend is negative".into());
    }

    let output = DdmOutput {
        value_per_share,
        spread: input.cost_of_equity - input.growth_rate,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Constant-growth Dividend Discount Model (Gordon)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn approx_eq(a: Decimal, b: Decimal, eps: Decimal) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn test_ddm_case_study() {
        let v = compute_ddm(dec!(2.50), dec!(0.045), dec!(0.09)).unwrap();
        // 2.50 / 0.045 = 55.5556
        assert!(approx_eq(v, dec!(55.56), dec!(0.01)));
    }

    #[test]
    fn test_ddm_matches_formula_across_spreads() {
        let d1 = dec!(1.75);
        for (g, k) in [
            (dec!(0.02), dec!(0.08)),
            (dec!(0.00), dec!(0.12)),
            (dec!(-0.03), dec!(0.07)),
            (dec!(0.06), dec!(0.061)),
        ] {
            let v = compute_ddm(d1, g, k).unwrap();
            assert_eq!(v, d1 / (k - g));
        }
    }

    #[test]
    fn test_ddm_equal_rates_is_hazard() {
        let err = compute_ddm(dec!(2.50), dec!(0.09), dec!(0.09)).unwrap_err();
        assert!(err.is_division_hazard());
        assert!(err.to_string().contains("cost of equity (0.09)"));
    }

    #[test]
    fn test_ddm_inverted_spread_is_negative() {
        let v = compute_ddm(dec!(2.00), dec!(0.12), dec!(0.10)).unwrap();
        assert_eq!(v, dec!(-100));
    }

    #[test]
    fn test_calculate_ddm_flags_inverted_spread() {
        let input = DdmInput {
            dividend: dec!(2.00),
            growth_rate: dec!(0.12),
            cost_of_equity: dec!(0.10),
        };
        let out = calculate_ddm(&input).unwrap();
        assert_eq!(out.result.spread, dec!(-0.02));
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("does not converge"));
    }

    #[test]
    fn test_calculate_ddm_clean_run_has_no_warnings() {
        let input = DdmInput {
            dividend: dec!(2.00),
            growth_rate: dec!(0.05),
            cost_of_equity: dec!(0.10),
        };
        let out = calculate_ddm(&input).unwrap();
        assert_eq!(out.result.value_per_share, dec!(40));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_ddm_is_idempotent() {
        let a = compute_ddm(dec!(2.50), dec!(0.045), dec!(0.09)).unwrap();
        let b = compute_ddm(dec!(2.50), dec!(0.045), dec!(0.09)).unwrap();
        assert_eq!(a.serialize(), b.serialize());
    }
}
