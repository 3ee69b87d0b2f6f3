use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Serialize;

use equity_valuation_core::depreciation::{analysis, schedule::DepreciationMethod};
use equity_valuation_core::valuation::{ddm, equity, fcfe, fcff, inputs};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Valuation models
// ---------------------------------------------------------------------------

#[napi]
pub fn dividend_discount(input_json: String) -> NapiResult<String> {
    let input: ddm::DdmInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = ddm::calculate_ddm(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn free_cash_flow_to_equity(input_json: String) -> NapiResult<String> {
    let input: fcfe::FcfeInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fcfe::calculate_fcfe(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn free_cash_flow_to_firm(input_json: String) -> NapiResult<String> {
    let input: fcff::FcffInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fcff::calculate_fcff(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn value_equity(input_json: String) -> NapiResult<String> {
    let input: inputs::ValuationInputs =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = equity::value_equity(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Inputs for a named case study ("case-study" or "classroom").
#[napi]
pub fn valuation_preset(name: String) -> NapiResult<String> {
    let preset: inputs::ValuationPreset = name.parse().map_err(to_napi_error)?;
    serde_json::to_string(&inputs::ValuationInputs::from_preset(preset)).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Depreciation
// ---------------------------------------------------------------------------

#[napi]
pub fn analyse_depreciation(input_json: String) -> NapiResult<String> {
    let input: analysis::DepreciationAnalysisInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = analysis::analyse_depreciation(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compare_depreciation_methods(input_json: String) -> NapiResult<String> {
    let input: analysis::MethodComparisonInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = analysis::compare_depreciation_methods(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(Serialize)]
struct ScheduleListing {
    name: &'static str,
    key: &'static str,
    amounts: Vec<Decimal>,
    total: Decimal,
}

#[napi]
pub fn depreciation_schedules() -> NapiResult<String> {
    let listing: Vec<ScheduleListing> = DepreciationMethod::ALL
        .iter()
        .map(|method| {
            let schedule = method.schedule();
            ScheduleListing {
                name: method.name(),
                key: method.key(),
                amounts: schedule.amounts().to_vec(),
                total: schedule.total(),
            }
        })
        .collect();
    serde_json::to_string(&listing).map_err(to_napi_error)
}
