//! Error types for the stair estimator.

use thiserror::Error;

/// Error codes for estimator failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Missing or non-positive required dimension (-1)
    InvalidDimension = -1,
    /// No unit materials selected (-2)
    NoUnitMaterials = -2,
    /// Derived step count is zero (-3)
    NoSteps = -3,
    /// Negative parameter where only zero-or-positive is allowed (-4)
    NegativeParameter = -4,
    /// Unit material with non-positive course height (-5)
    InvalidUnitMaterial = -5,
    /// I/O failure reading spec or catalogue (E100)
    Io = 100,
    /// Malformed JSON input (E101)
    Json = 101,
}

/// Main error type for the estimator.
///
/// Only input validation ever reaches the caller as a failure; all internal
/// search exhaustion is absorbed into cutting/burial flags on the result.
#[derive(Debug, Error)]
pub enum EstimateError {
    #[error("Invalid dimension '{field}': must be positive, got {value}")]
    InvalidDimension { field: &'static str, value: f64 },

    #[error("Negative value for '{field}': got {value}")]
    NegativeParameter { field: &'static str, value: f64 },

    #[error("No unit materials selected")]
    NoUnitMaterials,

    #[error("Unit material '{id}' has non-positive course height {height}")]
    InvalidUnitMaterial { id: String, height: f64 },

    #[error("Staircase yields no steps (total height {total_height}, step height {step_height})")]
    NoSteps {
        total_height: f64,
        step_height: f64,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EstimateError {
    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            EstimateError::InvalidDimension { .. } => ErrorCode::InvalidDimension,
            EstimateError::NegativeParameter { .. } => ErrorCode::NegativeParameter,
            EstimateError::NoUnitMaterials => ErrorCode::NoUnitMaterials,
            EstimateError::InvalidUnitMaterial { .. } => ErrorCode::InvalidUnitMaterial,
            EstimateError::NoSteps { .. } => ErrorCode::NoSteps,
            EstimateError::Io(_) => ErrorCode::Io,
            EstimateError::Json(_) => ErrorCode::Json,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }
}

/// Result type alias for estimator operations.
pub type Result<T> = std::result::Result<T, EstimateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_values() {
        let err = EstimateError::InvalidDimension {
            field: "total_height",
            value: 0.0,
        };
        assert_eq!(err.code(), ErrorCode::InvalidDimension);
        assert_eq!(err.code_value(), -1);

        assert_eq!(EstimateError::NoUnitMaterials.code_value(), -2);
    }

    #[test]
    fn test_display() {
        let err = EstimateError::NoSteps {
            total_height: 10.0,
            step_height: 0.0,
        };
        assert!(err.to_string().contains("no steps"));
    }
}
