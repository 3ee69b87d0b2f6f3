use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use equity_valuation_core::depreciation::analysis::{
    self, DepreciationAnalysisInput, MethodComparisonInput,
};
use equity_valuation_core::depreciation::projection::ProjectionAssumptions;
use equity_valuation_core::depreciation::schedule::DepreciationMethod;
use equity_valuation_core::depreciation::summary::SummaryMode;

use crate::input;

/// Overrides for the projection constants. Unset flags keep the defaults.
#[derive(Args)]
pub struct AssumptionArgs {
    /// Annual sales
    #[arg(long)]
    pub sales: Option<Decimal>,

    /// Cost of goods sold as a fraction of sales
    #[arg(long)]
    pub cogs_pct: Option<Decimal>,

    /// SG&A as a fraction of gross profit
    #[arg(long)]
    pub sgna_pct: Option<Decimal>,

    /// Corporate tax rate
    #[arg(long)]
    pub tax_rate: Option<Decimal>,

    /// Shares outstanding
    #[arg(long)]
    pub shares: Option<Decimal>,

    /// Required return used to capitalise or discount
    #[arg(long)]
    pub required_return: Option<Decimal>,
}

impl AssumptionArgs {
    fn resolve(&self) -> ProjectionAssumptions {
        let defaults = ProjectionAssumptions::default();
        ProjectionAssumptions {
            sales: self.sales.unwrap_or(defaults.sales),
            cogs_pct: self.cogs_pct.unwrap_or(defaults.cogs_pct),
            sgna_pct: self.sgna_pct.unwrap_or(defaults.sgna_pct),
            tax_rate: self.tax_rate.unwrap_or(defaults.tax_rate),
            shares: self.shares.unwrap_or(defaults.shares),
            required_return: self.required_return.unwrap_or(defaults.required_return),
        }
    }
}

/// Arguments for a single-method depreciation projection
#[derive(Args)]
pub struct DepreciationArgs {
    /// Depreciation method ("3-Year MACRS", "macrs-5", "straight-line", ...)
    #[arg(long)]
    pub method: Option<DepreciationMethod>,

    /// Summary mode: average or dcf
    #[arg(long, default_value = "average")]
    pub mode: SummaryMode,

    #[command(flatten)]
    pub assumptions: AssumptionArgs,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the side-by-side method comparison
#[derive(Args)]
pub struct CompareArgs {
    /// Summary mode: average or dcf
    #[arg(long, default_value = "average")]
    pub mode: SummaryMode,

    #[command(flatten)]
    pub assumptions: AssumptionArgs,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_depreciation(args: DepreciationArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let analysis_input: DepreciationAnalysisInput =
        match input::read_input(args.input.as_deref())? {
            Some(data) => data,
            None => DepreciationAnalysisInput {
                method: args
                    .method
                    .ok_or("--method is required (or provide --input)")?,
                mode: args.mode,
                assumptions: args.assumptions.resolve(),
            },
        };

    let result = analysis::analyse_depreciation(&analysis_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let comparison_input: MethodComparisonInput =
        match input::read_input(args.input.as_deref())? {
            Some(data) => data,
            None => MethodComparisonInput {
                mode: args.mode,
                assumptions: args.assumptions.resolve(),
            },
        };

    let result = analysis::compare_depreciation_methods(&comparison_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedules() -> Result<Value, Box<dyn std::error::Error>> {
    let schedules: Vec<Value> = DepreciationMethod::ALL
        .iter()
        .map(|method| {
            let schedule = method.schedule();
            json!({
                "name": method.name(),
                "key": method.key(),
                "amounts": schedule.amounts(),
                "total": schedule.total(),
            })
        })
        .collect();
    Ok(Value::Array(schedules))
}
