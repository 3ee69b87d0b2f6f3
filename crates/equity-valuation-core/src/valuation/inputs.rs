//! Valuation assumptions and the two ways of filling them: a named case-study
//! preset, or manual entry through [`ValuationInputsBuilder`]. A preset can
//! also seed the builder so that single fields are overridden.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValuationError;
use crate::types::{Money, Rate, Shares};
use crate::EquityValuationResult;

use super::ddm::DdmInput;
use super::fcfe::FcfeInput;
use super::fcff::FcffInput;

/// Scalar assumptions shared by the DDM, FCFE and FCFF models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationInputs {
    /// Next year's dividend per share (D₁).
    pub dividend: Money,
    pub dividend_growth: Rate,
    /// Cost of equity (k), discount rate for DDM and FCFE.
    pub cost_of_equity: Rate,
    /// Next year's free cash flow to equity.
    pub fcfe: Money,
    pub fcfe_growth: Rate,
    /// Next year's free cash flow to the firm.
    pub fcff: Money,
    pub fcff_growth: Rate,
    pub wacc: Rate,
    pub debt: Money,
    pub cash: Money,
    pub shares_outstanding: Shares,
}

impl ValuationInputs {
    /// Start manual entry with every field unset.
    pub fn builder() -> ValuationInputsBuilder {
        ValuationInputsBuilder::default()
    }

    pub fn from_preset(preset: ValuationPreset) -> Self {
        match preset {
            ValuationPreset::CaseStudy => ValuationInputs {
                dividend: dec!(2.50),
                dividend_growth: dec!(0.045),
                cost_of_equity: dec!(0.09),
                fcfe: dec!(1500000),
                fcfe_growth: dec!(0.04),
                fcff: dec!(2200000),
                fcff_growth: dec!(0.035),
                wacc: dec!(0.08),
                debt: dec!(3000000),
                cash: dec!(500000),
                shares_outstanding: dec!(500000),
            },
            ValuationPreset::Classroom => ValuationInputs {
                dividend: dec!(2.00),
                dividend_growth: dec!(0.05),
                cost_of_equity: dec!(0.10),
                fcfe: dec!(5),
                fcfe_growth: dec!(0.04),
                fcff: dec!(10),
                fcff_growth: Decimal::ZERO,
                wacc: dec!(0.08),
                debt: dec!(50),
                cash: dec!(20),
                shares_outstanding: dec!(10),
            },
        }
    }

    pub fn ddm_input(&self) -> DdmInput {
        DdmInput {
            dividend: self.dividend,
            growth_rate: self.dividend_growth,
            cost_of_equity: self.cost_of_equity,
        }
    }

    pub fn fcfe_input(&self) -> FcfeInput {
        FcfeInput {
            fcfe: self.fcfe,
            growth_rate: self.fcfe_growth,
            cost_of_equity: self.cost_of_equity,
            shares_outstanding: self.shares_outstanding,
        }
    }

    pub fn fcff_input(&self) -> FcffInput {
        FcffInput {
            fcff: self.fcff,
            growth_rate: self.fcff_growth,
            wacc: self.wacc,
            debt: self.debt,
            cash: self.cash,
            shares_outstanding: self.shares_outstanding,
        }
    }
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

/// Named case studies that autofill every assumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValuationPreset {
    /// Listed-company case study: $2.50 dividend, 500k shares, $3M debt.
    CaseStudy,
    /// Small round-number classroom example.
    Classroom,
}

impl ValuationPreset {
    pub const ALL: [ValuationPreset; 2] = [ValuationPreset::CaseStudy, ValuationPreset::Classroom];

    pub fn name(&self) -> &'static str {
        match self {
            ValuationPreset::CaseStudy => "case-study",
            ValuationPreset::Classroom => "classroom",
        }
    }
}

impl fmt::Display for ValuationPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ValuationPreset {
    type Err = ValuationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace([' ', '_'], "-");
        ValuationPreset::ALL
            .into_iter()
            .find(|p| p.name() == key)
            .ok_or_else(|| ValuationError::InvalidInput {
                field: "preset".into(),
                reason: format!("Unknown preset '{s}'; expected one of: case-study, classroom"),
            })
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Manual-entry builder. Every field must be set (or seeded from a preset)
/// before [`build`](ValuationInputsBuilder::build) succeeds.
#[derive(Debug, Clone, Default)]
pub struct ValuationInputsBuilder {
    dividend: Option<Money>,
    dividend_growth: Option<Rate>,
    cost_of_equity: Option<Rate>,
    fcfe: Option<Money>,
    fcfe_growth: Option<Rate>,
    fcff: Option<Money>,
    fcff_growth: Option<Rate>,
    wacc: Option<Rate>,
    debt: Option<Money>,
    cash: Option<Money>,
    shares_outstanding: Option<Shares>,
}

macro_rules! setter {
    ($($name:ident: $ty:ty),* $(,)?) => {
        $(
            pub fn $name(mut self, value: $ty) -> Self {
                self.$name = Some(value);
                self
            }
        )*
    };
}

impl ValuationInputsBuilder {
    /// Seed every field from a preset; later setters override single values.
    pub fn from_preset(preset: ValuationPreset) -> Self {
        let p = ValuationInputs::from_preset(preset);
        ValuationInputsBuilder {
            dividend: Some(p.dividend),
            dividend_growth: Some(p.dividend_growth),
            cost_of_equity: Some(p.cost_of_equity),
            fcfe: Some(p.fcfe),
            fcfe_growth: Some(p.fcfe_growth),
            fcff: Some(p.fcff),
            fcff_growth: Some(p.fcff_growth),
            wacc: Some(p.wacc),
            debt: Some(p.debt),
            cash: Some(p.cash),
            shares_outstanding: Some(p.shares_outstanding),
        }
    }

    setter! {
        dividend: Money,
        dividend_growth: Rate,
        cost_of_equity: Rate,
        fcfe: Money,
        fcfe_growth: Rate,
        fcff: Money,
        fcff_growth: Rate,
        wacc: Rate,
        debt: Money,
        cash: Money,
        shares_outstanding: Shares,
    }

    pub fn build(self) -> EquityValuationResult<ValuationInputs> {
        Ok(ValuationInputs {
            dividend: required(self.dividend, "dividend")?,
            dividend_growth: required(self.dividend_growth, "dividend_growth")?,
            cost_of_equity: required(self.cost_of_equity, "cost_of_equity")?,
            fcfe: required(self.fcfe, "fcfe")?,
            fcfe_growth: required(self.fcfe_growth, "fcfe_growth")?,
            fcff: required(self.fcff, "fcff")?,
            fcff_growth: required(self.fcff_growth, "fcff_growth")?,
            wacc: required(self.wacc, "wacc")?,
            debt: required(self.debt, "debt")?,
            cash: required(self.cash, "cash")?,
            shares_outstanding: required(self.shares_outstanding, "shares_outstanding")?,
        })
    }
}

fn required<T>(value: Option<T>, field: &str) -> EquityValuationResult<T> {
    value.ok_or_else(|| ValuationError::InvalidInput {
        field: field.into(),
        reason: "Required for manual entry (or seed the builder from a preset)".into(),
    })
}
