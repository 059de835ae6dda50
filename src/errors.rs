use thiserror::Error;

use crate::decimal::Money;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("invalid period: {value}")]
    InvalidPeriod {
        value: String,
    },

    #[error("period out of order: expected {expected}, got {actual}")]
    PeriodOutOfOrder {
        expected: u32,
        actual: u32,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("invalid amount for {field}: {amount}")]
    InvalidAmount {
        field: &'static str,
        amount: Money,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ScheduleError {
    /// arithmetic that left the range of a 96-bit decimal
    pub fn overflow(what: &str) -> Self {
        ScheduleError::CalculationError {
            message: format!("{} overflowed", what),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
