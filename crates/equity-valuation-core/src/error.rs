use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValuationError {
    /// A formula denominator is zero. `condition` names the inequality the
    /// caller has to restore, e.g. "WACC (0.08) must differ from growth rate (0.08)".
    #[error("Division hazard in {context}: {condition}")]
    DivisionHazard { context: String, condition: String },

    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl ValuationError {
    pub fn is_division_hazard(&self) -> bool {
        matches!(self, ValuationError::DivisionHazard { .. })
    }
}

impl From<serde_json::Error> for ValuationError {
    fn from(e: serde_json::Error) -> Self {
        ValuationError::SerializationError(e.to_string())
    }
}
