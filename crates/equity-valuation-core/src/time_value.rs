//! Discounting and perpetuity primitives shared by the valuation models and
//! the depreciation projection.
//!
//! Every division is pre-checked: a zero denominator is reported as
//! [`ValuationError::DivisionHazard`] and never reaches `Decimal`'s panicking
//! `/` operator.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::ValuationError;
use crate::types::{Money, Rate, Shares};
use crate::EquityValuationResult;

/// Compound growth factor `(1 + rate)^periods`.
pub fn compound_factor(rate: Rate, periods: u32) -> EquityValuationResult<Decimal> {
    if rate <= dec!(-1) {
        return Err(ValuationError::InvalidInput {
            field: "rate".into(),
            reason: "Discount rate must be greater than -100%".into(),
        });
    }

    let one_plus_r = Decimal::ONE
        .checked_add(rate)
        .ok_or_else(|| overflow("compound factor"))?;
    let mut factor = Decimal::ONE;
    for _ in 0..periods {
        factor = factor
            .checked_mul(one_plus_r)
            .ok_or_else(|| overflow("compound factor"))?;
    }
    Ok(factor)
}

/// Discount `amount` by a precomputed compound `factor`.
pub fn discount(amount: Money, factor: Decimal, context: &str) -> EquityValuationResult<Money> {
    checked_div(amount, factor, context, || {
        "discount factor must be non-zero".to_string()
    })
}

/// Grow a cash flow by one period: `amount × (1 + rate)`.
pub fn grow(amount: Money, rate: Rate, context: &str) -> EquityValuationResult<Money> {
    Decimal::ONE
        .checked_add(rate)
        .and_then(|factor| amount.checked_mul(factor))
        .ok_or_else(|| overflow(context))
}

/// Gordon growth perpetuity: `cash_flow / (discount_rate - growth_rate)`.
///
/// `cash_flow` is the first cash flow of the perpetuity (already one year out).
/// `rate_name` labels the discount rate in the hazard message.
pub fn gordon_growth_value(
    cash_flow: Money,
    discount_rate: Rate,
    growth_rate: Rate,
    rate_name: &str,
    context: &str,
) -> EquityValuationResult<Money> {
    let spread = discount_rate
        .checked_sub(growth_rate)
        .ok_or_else(|| overflow(context))?;
    checked_div(cash_flow, spread, context, || {
        format!("{rate_name} ({discount_rate}) must differ from growth rate ({growth_rate})")
    })
}

/// Divide an aggregate amount across the share count.
pub fn per_share(amount: Money, shares: Shares, context: &str) -> EquityValuationResult<Money> {
    checked_div(amount, shares, context, || {
        "shares outstanding must be non-zero".to_string()
    })
}

/// Capitalise a level annual amount as a no-growth perpetuity: `amount / rate`.
pub fn capitalise(amount: Money, rate: Rate, context: &str) -> EquityValuationResult<Money> {
    checked_div(amount, rate, context, || {
        "required return must be non-zero".to_string()
    })
}

/// Sum that reports overflow instead of panicking.
pub fn checked_sum(
    values: impl IntoIterator<Item = Decimal>,
    context: &str,
) -> EquityValuationResult<Decimal> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
        .ok_or_else(|| overflow(context))
}

fn checked_div(
    numerator: Decimal,
    denominator: Decimal,
    context: &str,
    condition: impl FnOnce() -> String,
) -> EquityValuationResult<Decimal> {
    if denominator.is_zero() {
        log::warn!("division hazard in {context}");
        return Err(ValuationError::DivisionHazard {
            context: context.to_string(),
            condition: condition(),
        });
    }
    numerator
        .checked_div(denominator)
        .ok_or_else(|| overflow(context))
}

pub(crate) fn overflow(context: &str) -> ValuationError {
    ValuationError::InvalidInput {
        field: context.to_string(),
        reason: "Result exceeds the representable decimal range".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_compound_factor_exact() {
        assert_eq!(compound_factor(dec!(0.10), 0).unwrap(), Decimal::ONE);
        assert_eq!(compound_factor(dec!(0.10), 2).unwrap(), dec!(1.21));
        assert_eq!(compound_factor(dec!(0.10), 3).unwrap(), dec!(1.331));
    }

    #[test]
    fn test_compound_factor_rejects_total_loss_rate() {
        assert!(compound_factor(dec!(-1), 3).is_err());
    }

    #[test]
    fn test_discount_by_factor() {
        let factor = compound_factor(dec!(0.10), 2).unwrap();
        assert_eq!(discount(dec!(121), factor, "pv").unwrap(), dec!(100));
        assert!(discount(dec!(121), Decimal::ZERO, "pv")
            .unwrap_err()
            .is_division_hazard());
    }

    #[test]
    fn test_discount_overflow_is_reported() {
        let tiny = dec!(0.0000000000000000000000000001);
        let result = discount(Decimal::MAX, tiny, "pv");
        assert!(matches!(result, Err(ValuationError::InvalidInput { .. })));
    }

    #[test]
    fn test_grow_checked() {
        assert_eq!(grow(dec!(100), dec!(0.04), "g").unwrap(), dec!(104));
        assert!(matches!(
            grow(Decimal::MAX, dec!(0.5), "g"),
            Err(ValuationError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_gordon_spread_overflow_is_reported() {
        let result = gordon_growth_value(dec!(1), Decimal::MAX, Decimal::MIN, "r", "test");
        assert!(matches!(result, Err(ValuationError::InvalidInput { .. })));
    }

    #[test]
    fn test_checked_sum() {
        assert_eq!(checked_sum([dec!(1), dec!(2.5)], "s").unwrap(), dec!(3.5));
        assert!(checked_sum([Decimal::MAX, Decimal::MAX], "s").is_err());
    }

    #[test]
    fn test_gordon_growth_basic() {
        let v = gordon_growth_value(dec!(3), dec!(0.10), dec!(0.04), "r", "test").unwrap();
        assert_eq!(v, dec!(50));
    }

    #[test]
    fn test_gordon_growth_zero_spread_is_hazard() {
        let err = gordon_growth_value(dec!(3), dec!(0.09), dec!(0.09), "cost of equity", "DDM")
            .unwrap_err();
        match err {
            ValuationError::DivisionHazard { context, condition } => {
                assert_eq!(context, "DDM");
                assert_eq!(
                    condition,
                    "cost of equity (0.09) must differ from growth rate (0.09)"
                );
            }
            other => panic!("expected division hazard, got {other:?}"),
        }
    }

    #[test]
    fn test_per_share_zero_shares_is_hazard() {
        let err = per_share(dec!(100), Decimal::ZERO, "FCFE").unwrap_err();
        assert!(err.is_division_hazard());
        assert!(err.to_string().contains("shares outstanding"));
    }

    #[test]
    fn test_tiny_spread_overflow_is_reported_not_panicking() {
        let result = gordon_growth_value(
            Decimal::MAX,
            dec!(0.0000000000000000000000000001),
            Decimal::ZERO,
            "r",
            "test",
        );
        assert!(matches!(result, Err(ValuationError::InvalidInput { .. })));
    }

    #[test]
    fn test_capitalise_zero_rate_is_hazard() {
        assert!(capitalise(dec!(5), Decimal::ZERO, "summary")
            .unwrap_err()
            .is_division_hazard());
    }
}
