use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::{with_metadata, ComputationOutput, Money};
use crate::EquityValuationResult;

use super::projection::{project_depreciation_impact, ProjectionAssumptions, ProjectionTable};
use super::schedule::DepreciationMethod;
use super::summary::{summarize_valuation, SummaryMode, ValuationSummary};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input for a single-method depreciation analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepreciationAnalysisInput {
    pub method: DepreciationMethod,
    #[serde(default)]
    pub mode: SummaryMode,
    #[serde(default)]
    pub assumptions: ProjectionAssumptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct DepreciationAnalysis {
    pub table: ProjectionTable,
    pub summary: ValuationSummary,
}

/// Input for comparing every named method side by side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MethodComparisonInput {
    #[serde(default)]
    pub mode: SummaryMode,
    #[serde(default)]
    pub assumptions: ProjectionAssumptions,
}

/// One method's row in a side-by-side comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodComparison {
    pub method: String,
    pub total_depreciation: Money,
    pub year_one_eps: Money,
    pub eps_valuation: Money,
    pub cf_valuation: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Project one method and summarise it.
pub fn analyse_depreciation(
    input: &DepreciationAnalysisInput,
) -> EquityValuationResult<ComputationOutput<DepreciationAnalysis>> {
    let start = Instant::now();

    let table = project_depreciation_impact(&input.method.schedule(), &input.assumptions)?;
    let summary = summarize_valuation(&table, input.mode)?;

    let mut warnings = Vec::new();
    if let Some(row) = table.rows().iter().find(|r| r.eps < Decimal::ZERO) {
        warnings.push(format!(
            "Year {}: depreciation ({}) exceeds operating profit; EPS is negative",
            row.year, row.depreciation
        ));
    }
    if input.mode == SummaryMode::AverageBased {
        warnings.push(
            "Average-based summary capitalises the unweighted mean and ignores the timing of cash flows"
                .into(),
        );
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        &format!("Depreciation impact projection ({}, {})", input.method, input.mode),
        input,
        warnings,
        elapsed,
        DepreciationAnalysis { table, summary },
    ))
}

/// Run every named method under the same assumptions and mode.
pub fn compare_depreciation_methods(
    input: &MethodComparisonInput,
) -> EquityValuationResult<ComputationOutput<Vec<MethodComparison>>> {
    let start = Instant::now();

    let comparisons = DepreciationMethod::ALL
        .iter()
        .map(|method| -> EquityValuationResult<MethodComparison> {
            let schedule = method.schedule();
            let table = project_depreciation_impact(&schedule, &input.assumptions)?;
            let summary = summarize_valuation(&table, input.mode)?;
            Ok(MethodComparison {
                method: method.name().to_string(),
                total_depreciation: schedule.total(),
                year_one_eps: table.rows()[0].eps,
                eps_valuation: summary.eps_valuation,
                cf_valuation: summary.cf_valuation,
            })
        })
        .collect::<EquityValuationResult<Vec<_>>>()?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        &format!("Depreciation method comparison ({})", input.mode),
        input,
        Vec::new(),
        elapsed,
        comparisons,
    ))
}
