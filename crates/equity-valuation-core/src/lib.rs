pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "valuation")]
pub mod valuation;

#[cfg(feature = "depreciation")]
pub mod depreciation;

pub use error::ValuationError;
pub use types::*;

/// Standard result type for all equity-valuation operations
pub type EquityValuationResult<T> = Result<T, ValuationError>;
