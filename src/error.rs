use thiserror::Error;

/// Everything that can go wrong while computing a loan.
///
/// Degenerate terms are rejected before any arithmetic runs, so a returned
/// figure is never `NaN`-like garbage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoanError {
    #[error("Invalid loan terms: {field} - {reason}")]
    InvalidLoanTerms { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Arithmetic overflow in {context}")]
    Overflow { context: String },

    #[error("Date out of range: {0}")]
    DateOutOfRange(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl LoanError {
    pub(crate) fn invalid(field: &str, reason: &str) -> Self {
        LoanError::InvalidLoanTerms {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn overflow(context: &str) -> Self {
        LoanError::Overflow {
            context: context.into(),
        }
    }
}

impl From<serde_json::Error> for LoanError {
    fn from(e: serde_json::Error) -> Self {
        LoanError::Serialization(e.to_string())
    }
}
