use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanError {
    #[error("invalid input: {field} {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error(
        "inconsistent inputs: balance of {residual:.6} after payment {period} exceeds tolerance {tolerance:e}"
    )]
    InconsistentInputs {
        period: u32,
        residual: f64,
        tolerance: f64,
    },

    #[error("export failed: {0}")]
    Export(String),
}

impl LoanError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        LoanError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

impl From<csv::Error> for LoanError {
    fn from(e: csv::Error) -> Self {
        LoanError::Export(e.to_string())
    }
}

impl From<std::io::Error> for LoanError {
    fn from(e: std::io::Error) -> Self {
        LoanError::Export(e.to_string())
    }
}

pub type LoanResult<T> = Result<T, LoanError>;
