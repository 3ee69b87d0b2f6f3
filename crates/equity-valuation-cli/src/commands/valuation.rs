use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use equity_valuation_core::valuation::ddm::{self, DdmInput};
use equity_valuation_core::valuation::equity;
use equity_valuation_core::valuation::fcfe::{self, FcfeInput};
use equity_valuation_core::valuation::fcff::{self, FcffInput};
use equity_valuation_core::valuation::inputs::{
    ValuationInputs, ValuationInputsBuilder, ValuationPreset,
};

use crate::input;

/// Arguments for the Dividend Discount Model
#[derive(Args)]
#[command(allow_negative_numbers = true)]
pub struct DdmArgs {
    /// Next year's dividend per share (D1)
    #[arg(long)]
    pub dividend: Option<Decimal>,

    /// Perpetual dividend growth rate (e.g. 0.045 for 4.5%)
    #[arg(long)]
    pub growth: Option<Decimal>,

    /// Cost of equity (e.g. 0.09 for 9%)
    #[arg(long)]
    pub cost_of_equity: Option<Decimal>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for Free Cash Flow to Equity
#[derive(Args)]
#[command(allow_negative_numbers = true)]
pub struct FcfeArgs {
    /// Next year's free cash flow to equity
    #[arg(long)]
    pub fcfe: Option<Decimal>,

    /// Perpetual FCFE growth rate
    #[arg(long)]
    pub growth: Option<Decimal>,

    /// Cost of equity
    #[arg(long)]
    pub cost_of_equity: Option<Decimal>,

    /// Shares outstanding
    #[arg(long)]
    pub shares: Option<Decimal>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for Free Cash Flow to the Firm
#[derive(Args)]
#[command(allow_negative_numbers = true)]
pub struct FcffArgs {
    /// Next year's free cash flow to the firm
    #[arg(long)]
    pub fcff: Option<Decimal>,

    /// Perpetual FCFF growth rate
    #[arg(long)]
    pub growth: Option<Decimal>,

    /// Weighted average cost of capital
    #[arg(long)]
    pub wacc: Option<Decimal>,

    /// Total debt
    #[arg(long)]
    pub debt: Option<Decimal>,

    /// Cash & cash equivalents
    #[arg(long)]
    pub cash: Option<Decimal>,

    /// Shares outstanding
    #[arg(long)]
    pub shares: Option<Decimal>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the side-by-side valuation
#[derive(Args)]
#[command(allow_negative_numbers = true)]
pub struct ValueArgs {
    /// Autofill every assumption from a case study (case-study, classroom)
    #[arg(long)]
    pub preset: Option<ValuationPreset>,

    #[arg(long)]
    pub dividend: Option<Decimal>,
    #[arg(long)]
    pub dividend_growth: Option<Decimal>,
    #[arg(long)]
    pub cost_of_equity: Option<Decimal>,
    #[arg(long)]
    pub fcfe: Option<Decimal>,
    #[arg(long)]
    pub fcfe_growth: Option<Decimal>,
    #[arg(long)]
    pub fcff: Option<Decimal>,
    #[arg(long)]
    pub fcff_growth: Option<Decimal>,
    #[arg(long)]
    pub wacc: Option<Decimal>,
    #[arg(long)]
    pub debt: Option<Decimal>,
    #[arg(long)]
    pub cash: Option<Decimal>,
    #[arg(long)]
    pub shares: Option<Decimal>,

    /// Path to JSON/YAML input file (overrides preset and flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_ddm(args: DdmArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let ddm_input: DdmInput = match input::read_input(args.input.as_deref())? {
        Some(data) => data,
        None => DdmInput {
            dividend: args
                .dividend
                .ok_or("--dividend is required (or provide --input)")?,
            growth_rate: args
                .growth
                .ok_or("--growth is required (or provide --input)")?,
            cost_of_equity: args
                .cost_of_equity
                .ok_or("--cost-of-equity is required (or provide --input)")?,
        },
    };

    let result = ddm::calculate_ddm(&ddm_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_fcfe(args: FcfeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let fcfe_input: FcfeInput = match input::read_input(args.input.as_deref())? {
        Some(data) => data,
        None => FcfeInput {
            fcfe: args.fcfe.ok_or("--fcfe is required (or provide --input)")?,
            growth_rate: args
                .growth
                .ok_or("--growth is required (or provide --input)")?,
            cost_of_equity: args
                .cost_of_equity
                .ok_or("--cost-of-equity is required (or provide --input)")?,
            shares_outstanding: args
                .shares
                .ok_or("--shares is required (or provide --input)")?,
        },
    };

    let result = fcfe::calculate_fcfe(&fcfe_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_fcff(args: FcffArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let fcff_input: FcffInput = match input::read_input(args.input.as_deref())? {
        Some(data) => data,
        None => FcffInput {
            fcff: args.fcff.ok_or("--fcff is required (or provide --input)")?,
            growth_rate: args
                .growth
                .ok_or("--growth is required (or provide --input)")?,
            wacc: args.wacc.ok_or("--wacc is required (or provide --input)")?,
            debt: args.debt.unwrap_or(Decimal::ZERO),
            cash: args.cash.unwrap_or(Decimal::ZERO),
            shares_outstanding: args
                .shares
                .ok_or("--shares is required (or provide --input)")?,
        },
    };

    let result = fcff::calculate_fcff(&fcff_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_value(args: ValueArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs: ValuationInputs = match input::read_input(args.input.as_deref())? {
        Some(data) => data,
        None => build_from_flags(&args)?,
    };

    let result = equity::value_equity(&inputs)?;
    Ok(serde_json::to_value(result)?)
}

/// Seed from the preset (if any), then apply every flag that was given.
fn build_from_flags(args: &ValueArgs) -> Result<ValuationInputs, Box<dyn std::error::Error>> {
    let mut builder = match args.preset {
        Some(preset) => ValuationInputsBuilder::from_preset(preset),
        None => ValuationInputs::builder(),
    };

    macro_rules! apply {
        ($($flag:ident => $setter:ident),* $(,)?) => {
            $(
                if let Some(v) = args.$flag {
                    builder = builder.$setter(v);
                }
            )*
        };
    }

    apply! {
        dividend => dividend,
        dividend_growth => dividend_growth,
        cost_of_equity => cost_of_equity,
        fcfe => fcfe,
        fcfe_growth => fcfe_growth,
        fcff => fcff,
        fcff_growth => fcff_growth,
        wacc => wacc,
        debt => debt,
        cash => cash,
        shares => shares_outstanding,
    }

    builder.build().map_err(|e| {
        format!("{e} (pass --preset case-study|classroom or set every flag)").into()
    })
}
