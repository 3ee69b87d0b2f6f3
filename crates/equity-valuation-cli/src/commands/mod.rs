pub mod depreciation;
pub mod valuation;
