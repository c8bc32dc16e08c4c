use thiserror::Error;

use crate::decimal::Money;
use crate::types::DebtId;

#[derive(Error, Debug)]
pub enum PayoffError {
    #[error("invalid input: payment must be greater than 0 (got {payment})")]
    NonPositivePayment {
        payment: Money,
    },

    #[error("invalid input: payment too low to ever amortize: payment {payment} does not exceed monthly interest {interest}")]
    PaymentTooLow {
        payment: Money,
        interest: Money,
    },

    #[error("schedule did not converge after {periods} periods: remaining balance {remaining}")]
    ScheduleDidNotConverge {
        periods: u32,
        remaining: Money,
    },

    #[error("debt not found: {id}")]
    DebtNotFound {
        id: DebtId,
    },

    #[error("invalid debt: {message}")]
    InvalidDebt {
        message: String,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("invalid document: {message}")]
    InvalidDocument {
        message: String,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PayoffError {
    /// errors caused by a payment the caller should re-prompt for
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            PayoffError::NonPositivePayment { .. } | PayoffError::PaymentTooLow { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PayoffError>;
