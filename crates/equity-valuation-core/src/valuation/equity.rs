//! Side-by-side equity valuation: DDM, FCFE and FCFF evaluated independently
//! from one set of [`ValuationInputs`].
//!
//! Each model yields a tagged [`ModelOutcome`]. A division hazard in one model
//! is recorded as `Undefined` for that model only; the other two are still
//! computed.

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::ValuationError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::EquityValuationResult;

use super::ddm::compute_ddm;
use super::fcfe::compute_fcfe;
use super::fcff::compute_fcff;
use super::inputs::ValuationInputs;
use super::inverted_spread_warning;

/// Result of one model in a batch valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ModelOutcome {
    /// Discount rate exceeds growth; the value is meaningful.
    Valued { value_per_share: Money },
    /// Discount rate below growth. The arithmetic value is kept but the
    /// perpetuity does not converge.
    Inverted {
        value_per_share: Money,
        reason: String,
    },
    /// A formula denominator was zero.
    Undefined { reason: String },
}

impl ModelOutcome {
    /// The numeric value, if one could be computed (including inverted ones).
    pub fn value_per_share(&self) -> Option<Money> {
        match self {
            ModelOutcome::Valued { value_per_share }
            | ModelOutcome::Inverted {
                value_per_share, ..
            } => Some(*value_per_share),
            ModelOutcome::Undefined { .. } => None,
        }
    }

    pub fn is_valued(&self) -> bool {
        matches!(self, ModelOutcome::Valued { .. })
    }

    fn reason(&self) -> Option<&str> {
        match self {
            ModelOutcome::Valued { .. } => None,
            ModelOutcome::Inverted { reason, .. } | ModelOutcome::Undefined { reason } => {
                Some(reason)
            }
        }
    }
}

/// Per-share values from all three models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    pub ddm_value_per_share: ModelOutcome,
    pub fcfe_value_per_share: ModelOutcome,
    pub fcff_value_per_share: ModelOutcome,
}

impl ValuationResult {
    fn outcomes(&self) -> [&ModelOutcome; 3] {
        [
            &self.ddm_value_per_share,
            &self.fcfe_value_per_share,
            &self.fcff_value_per_share,
        ]
    }
}

/// Value the equity with all three models.
///
/// Never fails: a division hazard or decimal overflow in one model is
/// reported in that model's [`ModelOutcome`] and echoed into the envelope
/// warnings.
pub fn value_equity(
    inputs: &ValuationInputs,
) -> EquityValuationResult<ComputationOutput<ValuationResult>> {
    let start = Instant::now();

    let ddm_value_per_share = classify(
        compute_ddm(inputs.dividend, inputs.dividend_growth, inputs.cost_of_equity),
        "DDM",
        "cost of equity",
        inputs.cost_of_equity,
        inputs.dividend_growth,
    );
    let fcfe_value_per_share = classify(
        compute_fcfe(
            inputs.fcfe,
            inputs.fcfe_growth,
            inputs.cost_of_equity,
            inputs.shares_outstanding,
        ),
        "FCFE",
        "cost of equity",
        inputs.cost_of_equity,
        inputs.fcfe_growth,
    );
    let fcff_value_per_share = classify(
        compute_fcff(
            inputs.fcff,
            inputs.fcff_growth,
            inputs.wacc,
            inputs.debt,
            inputs.cash,
            inputs.shares_outstanding,
        ),
        "FCFF",
        "WACC",
        inputs.wacc,
        inputs.fcff_growth,
    );

    let result = ValuationResult {
        ddm_value_per_share,
        fcfe_value_per_share,
        fcff_value_per_share,
    };

    let warnings: Vec<String> = result
        .outcomes()
        .into_iter()
        .filter_map(|o| o.reason().map(str::to_string))
        .collect();

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Equity valuation comparison (DDM, FCFE, FCFF)",
        inputs,
        warnings,
        elapsed,
        result,
    ))
}

/// Turn a single-model result into an outcome.
fn classify(
    computed: EquityValuationResult<Money>,
    model: &str,
    rate_name: &str,
    rate: Rate,
    growth: Rate,
) -> ModelOutcome {
    match computed {
        Ok(value_per_share) => match inverted_spread_warning(model, rate_name, rate, growth) {
            Some(reason) => ModelOutcome::Inverted {
                value_per_share,
                reason,
            },
            None => ModelOutcome::Valued { value_per_share },
        },
        Err(ValuationError::DivisionHazard { condition, .. }) => ModelOutcome::Undefined {
            reason: format!("{model} undefined: {condition}"),
        },
        Err(e) => {
            log::warn!("{model} failed: {e}");
            ModelOutcome::Undefined {
                reason: format!("{model} undefined: {e}"),
            }
        }
    }
}
