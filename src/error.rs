use thiserror::Error;

#[derive(Error, Debug)]
pub enum SavingsScheduleError {
    #[error("Invalid monthly amount {0}: must be greater than 0")]
    InvalidMonthlyAmount(i64),

    #[error("Invalid period {0} years: must be at least 1 year and fit in a monthly schedule")]
    InvalidPeriodYears(u32),

    #[error("Invalid annual interest rate {0}: must be a finite value >= 0.0")]
    InvalidInterestRate(f64),

    #[error("Invalid adjustment for period {period}: amount {amount} must not be negative")]
    InvalidAdjustmentAmount { period: u32, amount: i64 },

    #[error("Invalid unit pricing: {units} units at {unit_price} each")]
    InvalidUnitPricing { unit_price: i64, units: i64 },

    #[error("Amount overflow in period {period}: running balance exceeds the supported range")]
    AmountOverflow { period: u32 },

    #[error("Savings plan not found: {0}")]
    PlanNotFound(u64),

    #[error("Date calculation error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SavingsScheduleError>;
