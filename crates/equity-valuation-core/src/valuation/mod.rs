pub mod ddm;
pub mod equity;
pub mod fcfe;
pub mod fcff;
pub mod inputs;

use crate::error::ValuationError;
use crate::types::{Rate, Shares};
use crate::EquityValuationResult;

/// Warning text for a discount rate below the growth rate. The arithmetic
/// still yields a (negative) value, but the perpetuity does not converge.
pub(crate) fn inverted_spread_warning(
    model: &str,
    rate_name: &str,
    rate: Rate,
    growth: Rate,
) -> Option<String> {
    if rate < growth {
        Some(format!(
            "{model}: {rate_name} ({rate}) is below growth rate ({growth}); \
             the perpetuity does not converge and the value is economically invalid"
        ))
    } else {
        None
    }
}

/// A zero spread and a zero share count at once are reported as one hazard
/// naming both conditions.
pub(crate) fn check_joint_hazard(
    model: &str,
    rate_name: &str,
    rate: Rate,
    growth: Rate,
    shares: Shares,
) -> EquityValuationResult<()> {
    if rate == growth && shares.is_zero() {
        return Err(ValuationError::DivisionHazard {
            context: model.to_string(),
            condition: format!(
                "{rate_name} ({rate}) must differ from growth rate ({growth}); \
                 shares outstanding must be non-zero"
            ),
        });
    }
    Ok(())
}
