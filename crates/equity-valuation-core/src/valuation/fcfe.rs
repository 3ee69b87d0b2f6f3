//! Free Cash Flow to Equity valuation.
//!
//! Formula:
//!   Equity = FCFE × (1 + g) / (k - g)
//!   Value per share = Equity / shares
//!
//! The cash flow is grown one period before capitalisation. `k == g` and a
//! zero share count are separate hazards.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::time_value::{gordon_growth_value, grow, per_share};
use crate::types::{with_metadata, ComputationOutput, Money, Rate, Shares};
use crate::EquityValuationResult;

use super::{check_joint_hazard, inverted_spread_warning};

/// Input for the FCFE valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FcfeInput {
    /// Next year's free cash flow to equity (aggregate, not per share).
    pub fcfe: Money,
    /// Perpetual FCFE growth rate.
    pub growth_rate: Rate,
    /// Cost of equity (k).
    pub cost_of_equity: Rate,
    pub shares_outstanding: Shares,
}

/// Output of the FCFE valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FcfeOutput {
    /// Aggregate equity value.
    pub equity_value: Money,
    pub value_per_share: Money,
}

fn fcfe_equity_value(
    fcfe: Money,
    growth_rate: Rate,
    cost_of_equity: Rate,
    shares_outstanding: Shares,
) -> EquityValuationResult<Money> {
    check_joint_hazard(
        "FCFE",
        "cost of equity",
        cost_of_equity,
        growth_rate,
        shares_outstanding,
    )?;
    let grown = grow(fcfe, growth_rate, "FCFE")?;
    gordon_growth_value(grown, cost_of_equity, growth_rate, "cost of equity", "FCFE")
}

/// Value per share `(FCFE × (1 + g)) / (k - g) / shares`.
pub fn compute_fcfe(
    fcfe: Money,
    growth_rate: Rate,
    cost_of_equity: Rate,
    shares_outstanding: Shares,
) -> EquityValuationResult<Money> {
    let equity_value =
        fcfe_equity_value(fcfe, growth_rate, cost_of_equity, shares_outstanding)?;
    let value = per_share(equity_value, shares_outstanding, "FCFE")?;
    log::debug!("FCFE: equity={equity_value} shares={shares_outstanding} -> {value}");
    Ok(value)
}

/// Run the FCFE valuation and wrap it in the standard output envelope.
pub fn calculate_fcfe(input: &FcfeInput) -> EquityValuationResult<ComputationOutput<FcfeOutput>> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    let equity_value = fcfe_equity_value(
        input.fcfe,
        input.growth_rate,
        input.cost_of_equity,
        input.shares_outstanding,
    )?;
    let value_per_share = per_share(equity_value, input.shares_outstanding, "FCFE")?;

    if let Some(w) =
        inverted_spread_warning("FCFE", "cost of equity", input.cost_of_equity, input.growth_rate)
    {
        log::warn!("{w}");
        warnings.push(w);
    }
    if input.shares_outstanding < Decimal::ZERO {
        warnings.push("FCFE: shares outstanding is negative".into());
    }

    let output = FcfeOutput {
        equity_value,
        value_per_share,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Free Cash Flow to Equity (single-stage growth)",
        input,
        warnings,
        elapsed,
        output,
    ))
}
