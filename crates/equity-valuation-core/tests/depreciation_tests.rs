use equity_valuation_core::depreciation::analysis::{
    analyse_depreciation, compare_depreciation_methods, DepreciationAnalysisInput,
    MethodComparisonInput,
};
use equity_valuation_core::depreciation::projection::{
    project_depreciation_impact, ProjectionAssumptions,
};
use equity_valuation_core::depreciation::schedule::{DepreciationMethod, DepreciationSchedule};
use equity_valuation_core::depreciation::summary::{summarize_valuation, SummaryMode};
use equity_valuation_core::format_usd;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Projection table
// ===========================================================================

#[test]
fn test_every_method_projects_six_ascending_years() {
    for method in DepreciationMethod::ALL {
        let table =
            project_depreciation_impact(&method.schedule(), &ProjectionAssumptions::default())
                .unwrap();
        let years: Vec<u32> = table.rows().iter().map(|r| r.year).collect();
        assert_eq!(years, vec![1, 2, 3, 4, 5, 6]);
        for (row, amount) in table.rows().iter().zip(method.amounts()) {
            assert_eq!(row.depreciation, amount);
        }
    }
}

#[test]
fn test_straight_line_depreciation_in_every_row() {
    let table = project_depreciation_impact(
        &DepreciationMethod::StraightLine.schedule(),
        &ProjectionAssumptions::default(),
    )
    .unwrap();
    assert!(table.rows().iter().all(|r| r.depreciation == dec!(6666.67)));
}

#[test]
fn test_custom_schedule_projection() {
    let schedule = DepreciationSchedule::custom(
        "Front-loaded",
        [dec!(20000), dec!(20000), Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO],
    )
    .unwrap();
    let table = project_depreciation_impact(&schedule, &ProjectionAssumptions::default()).unwrap();
    assert_eq!(table.method(), "Front-loaded");
    // EBIT 14,000 × 0.79 = 11,060 → EPS 1.106; CF (11,060 + 20,000) / 10,000
    assert_eq!(table.rows()[0].eps, dec!(1.106));
    assert_eq!(table.rows()[0].cf_per_share, dec!(3.106));
}

// ===========================================================================
// Summaries
// ===========================================================================

#[test]
fn test_summary_modes_for_default_schedule() {
    let table = project_depreciation_impact(
        &DepreciationMethod::StraightLine.schedule(),
        &ProjectionAssumptions::default(),
    )
    .unwrap();

    let avg = summarize_valuation(&table, SummaryMode::AverageBased).unwrap();
    let dcf = summarize_valuation(&table, SummaryMode::DcfBased).unwrap();

    let mean_eps: Decimal = table.rows().iter().map(|r| r.eps).sum::<Decimal>() / dec!(6);
    assert!((avg.eps_valuation - mean_eps / dec!(0.10)).abs() < dec!(0.000000001));

    let pv_sum: Decimal = table.rows().iter().map(|r| r.pv_cf_per_share).sum();
    assert_eq!(dcf.cf_valuation, pv_sum);

    assert_ne!(avg.eps_valuation, dcf.eps_valuation);
    assert_eq!(format_usd(avg.eps_valuation), "$21.59");
    assert_eq!(format_usd(dcf.eps_valuation), "$9.40");
    assert_eq!(format_usd(dcf.cf_valuation), "$12.31");
}

#[test]
fn test_summary_is_idempotent() {
    let schedule = DepreciationMethod::Macrs5Year.schedule();
    let a = project_depreciation_impact(&schedule, &ProjectionAssumptions::default()).unwrap();
    let b = project_depreciation_impact(&schedule, &ProjectionAssumptions::default()).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        summarize_valuation(&a, SummaryMode::DcfBased).unwrap(),
        summarize_valuation(&b, SummaryMode::DcfBased).unwrap()
    );
}

// ===========================================================================
// Analysis envelopes
// ===========================================================================

#[test]
fn test_analysis_envelope_json_shape() {
    let out = analyse_depreciation(&DepreciationAnalysisInput {
        method: DepreciationMethod::Macrs5Year,
        mode: SummaryMode::DcfBased,
        assumptions: ProjectionAssumptions::default(),
    })
    .unwrap();
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["result"]["table"]["method"], "5-Year MACRS");
    assert_eq!(json["result"]["table"]["rows"].as_array().unwrap().len(), 6);
    assert_eq!(json["result"]["summary"]["mode"], "dcf-based");
    assert!(out.warnings.is_empty());
}

#[test]
fn test_comparison_average_mode_macrs_tie() {
    let out = compare_depreciation_methods(&MethodComparisonInput::default()).unwrap();
    assert_eq!(out.result.len(), 3);
    assert_eq!(out.result[0].total_depreciation, dec!(40000));
    assert_eq!(out.result[0].cf_valuation, out.result[1].cf_valuation);
}
