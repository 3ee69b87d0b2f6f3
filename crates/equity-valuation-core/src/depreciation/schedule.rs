//! Named depreciation schedules over the six-year projection horizon.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValuationError;
use crate::types::Money;
use crate::EquityValuationResult;

use super::PROJECTION_YEARS;

/// The depreciation methods the projection can be run under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepreciationMethod {
    #[serde(rename = "macrs-3", alias = "3-Year MACRS")]
    Macrs3Year,
    #[serde(rename = "macrs-5", alias = "5-Year MACRS")]
    Macrs5Year,
    #[serde(rename = "straight-line", alias = "Straight-Line")]
    StraightLine,
}

impl DepreciationMethod {
    pub const ALL: [DepreciationMethod; 3] = [
        DepreciationMethod::Macrs3Year,
        DepreciationMethod::Macrs5Year,
        DepreciationMethod::StraightLine,
    ];

    /// Display name, e.g. "3-Year MACRS".
    pub fn name(&self) -> &'static str {
        match self {
            DepreciationMethod::Macrs3Year => "3-Year MACRS",
            DepreciationMethod::Macrs5Year => "5-Year MACRS",
            DepreciationMethod::StraightLine => "Straight-Line",
        }
    }

    /// Short command-line key, e.g. "macrs-3".
    pub fn key(&self) -> &'static str {
        match self {
            DepreciationMethod::Macrs3Year => "macrs-3",
            DepreciationMethod::Macrs5Year => "macrs-5",
            DepreciationMethod::StraightLine => "straight-line",
        }
    }

    pub fn amounts(&self) -> [Money; PROJECTION_YEARS] {
        match self {
            DepreciationMethod::Macrs3Year => [
                dec!(13200),
                dec!(18000),
                dec!(6000),
                dec!(2800),
                Decimal::ZERO,
                Decimal::ZERO,
            ],
            DepreciationMethod::Macrs5Year => [
                dec!(8000),
                dec!(12800),
                dec!(7600),
                dec!(4800),
                dec!(4800),
                dec!(2000),
            ],
            DepreciationMethod::StraightLine => [dec!(6666.67); PROJECTION_YEARS],
        }
    }

    pub fn schedule(&self) -> DepreciationSchedule {
        DepreciationSchedule {
            name: self.name().to_string(),
            amounts: self.amounts(),
        }
    }
}

impl fmt::Display for DepreciationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DepreciationMethod {
    type Err = ValuationError;

    /// Accepts the display name (any case) or the short key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        DepreciationMethod::ALL
            .into_iter()
            .find(|m| {
                m.name().eq_ignore_ascii_case(needle) || m.key().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| ValuationError::InvalidInput {
                field: "method".into(),
                reason: format!(
                    "Unknown depreciation method '{s}'; expected one of: {}",
                    DepreciationMethod::ALL
                        .iter()
                        .map(|m| format!("{} ({})", m.name(), m.key()))
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            })
    }
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

/// A named, fixed-length sequence of annual depreciation charges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSchedule")]
pub struct DepreciationSchedule {
    name: String,
    amounts: [Money; PROJECTION_YEARS],
}

#[derive(Deserialize)]
struct RawSchedule {
    name: String,
    amounts: Vec<Money>,
}

impl TryFrom<RawSchedule> for DepreciationSchedule {
    type Error = ValuationError;

    fn try_from(raw: RawSchedule) -> Result<Self, Self::Error> {
        let amounts: [Money; PROJECTION_YEARS] =
            raw.amounts
                .try_into()
                .map_err(|v: Vec<Money>| ValuationError::InvalidInput {
                    field: "amounts".into(),
                    reason: format!(
                        "Schedule must have exactly {PROJECTION_YEARS} annual amounts, got {}",
                        v.len()
                    ),
                })?;
        DepreciationSchedule::custom(raw.name, amounts)
    }
}

impl DepreciationSchedule {
    /// Build a schedule from caller-supplied amounts. All amounts must be
    /// non-negative.
    pub fn custom(
        name: impl Into<String>,
        amounts: [Money; PROJECTION_YEARS],
    ) -> EquityValuationResult<Self> {
        if let Some((idx, amt)) = amounts.iter().enumerate().find(|(_, a)| **a < Decimal::ZERO) {
            return Err(ValuationError::InvalidInput {
                field: format!("amounts[{idx}]"),
                reason: format!("Depreciation must be non-negative, got {amt}"),
            });
        }
        Ok(DepreciationSchedule {
            name: name.into(),
            amounts,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amounts(&self) -> &[Money; PROJECTION_YEARS] {
        &self.amounts
    }

    pub fn total(&self) -> Money {
        self.amounts.iter().copied().sum()
    }
}

impl From<DepreciationMethod> for DepreciationSchedule {
    fn from(method: DepreciationMethod) -> Self {
        method.schedule()
    }
}
