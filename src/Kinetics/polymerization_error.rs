use thiserror::Error;

/// error types of the free-radical polymerization solver
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PolymerizationError {
    /// argument rejected before any stepping occurs
    #[error("Invalid argument {parameter} = {value}: {reason}")]
    InvalidArgument {
        parameter: String,
        value: f64,
        reason: String,
    },
    /// a quantity of the run would be divided by zero
    #[error("Division by zero while computing {quantity}: {cause}")]
    DivisionByZero { quantity: String, cause: String },
    #[error("Solver not initialized. Call solve() first.")]
    NotSolved,
    #[error("Failed to load task file '{path}': {reason}")]
    TaskFile { path: String, reason: String },
}

impl PolymerizationError {
    pub fn invalid(parameter: &str, value: f64, reason: &str) -> Self {
        PolymerizationError::InvalidArgument {
            parameter: parameter.to_string(),
            value,
            reason: reason.to_string(),
        }
    }

    pub fn division_by_zero(quantity: &str, cause: &str) -> Self {
        PolymerizationError::DivisionByZero {
            quantity: quantity.to_string(),
            cause: cause.to_string(),
        }
    }

    pub fn task_file(path: &str, reason: impl ToString) -> Self {
        PolymerizationError::TaskFile {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }
}
