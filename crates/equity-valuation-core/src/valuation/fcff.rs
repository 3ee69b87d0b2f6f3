//! Free Cash Flow to the Firm valuation with a net-debt equity bridge.
//!
//! Formula:
//!   Firm value   = FCFF × (1 + g) / (WACC - g)
//!   Equity value = Firm value - debt + cash
//!   Value per share = Equity value / shares

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::time_value::{gordon_growth_value, grow, overflow, per_share};
use crate::types::{with_metadata, ComputationOutput, Money, Rate, Shares};
use crate::EquityValuationResult;

use super::{check_joint_hazard, inverted_spread_warning};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input for the FCFF valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FcffInput {
    /// Next year's free cash flow to the firm.
    pub fcff: Money,
    /// Perpetual FCFF growth rate.
    pub growth_rate: Rate,
    /// Weighted average cost of capital (discount rate)
    pub wacc: Rate,
    /// Total debt deducted in the equity bridge
    pub debt: Money,
    /// Cash & equivalents added back in the equity bridge
    pub cash: Money,
    pub shares_outstanding: Shares,
}

/// Output of the FCFF valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FcffOutput {
    pub firm_value: Money,
    /// Firm value - debt + cash
    pub equity_value: Money,
    pub value_per_share: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Value per share from FCFF. `wacc == g` and `shares == 0` are independent
/// division hazards.
pub fn compute_fcff(
    fcff: Money,
    growth_rate: Rate,
    wacc: Rate,
    debt: Money,
    cash: Money,
    shares_outstanding: Shares,
) -> EquityValuationResult<Money> {
    let bridge = equity_bridge(fcff, growth_rate, wacc, debt, cash, shares_outstanding)?;
    Ok(bridge.value_per_share)
}

/// Run the FCFF valuation and wrap it in the standard output envelope.
pub fn calculate_fcff(input: &FcffInput) -> EquityValuationResult<ComputationOutput<FcffOutput>> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    let output = equity_bridge(
        input.fcff,
        input.growth_rate,
        input.wacc,
        input.debt,
        input.cash,
        input.shares_outstanding,
    )?;

    if let Some(w) = inverted_spread_warning("FCFF", "WACC", input.wacc, input.growth_rate) {
        log::warn!("{w}");
        warnings.push(w);
    }
    if output.equity_value < Decimal::ZERO && output.firm_value > Decimal::ZERO {
        warnings.push(format!(
            "FCFF: net debt ({}) exceeds firm value ({}); equity is negative",
            input.debt.saturating_sub(input.cash),
            output.firm_value
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Free Cash Flow to the Firm (WACC-based, net-debt bridge)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn equity_bridge(
    fcff: Money,
    growth_rate: Rate,
    wacc: Rate,
    debt: Money,
    cash: Money,
    shares_outstanding: Shares,
) -> EquityValuationResult<FcffOutput> {
    check_joint_hazard("FCFF", "WACC", wacc, growth_rate, shares_outstanding)?;
    let grown = grow(fcff, growth_rate, "FCFF")?;
    let firm_value = gordon_growth_value(grown, wacc, growth_rate, "WACC", "FCFF")?;
    let equity_value = firm_value
        .checked_sub(debt)
        .and_then(|v| v.checked_add(cash))
        .ok_or_else(|| overflow("FCFF"))?;
    let value_per_share = per_share(equity_value, shares_outstanding, "FCFF")?;

    log::debug!(
        "FCFF: firm={firm_value} equity={equity_value} shares={shares_outstanding} -> {value_per_share}"
    );

    Ok(FcffOutput {
        firm_value,
        equity_value,
        value_per_share,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
