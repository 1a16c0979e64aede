//! Engine error taxonomy.
//!
//! [`ValidationError`] covers everything wrong with user-entered expense
//! data; it is caught at the boundary between input and a persisted
//! [`Expense`] and surfaced to the caller with a specific kind so the UI can
//! render an inline message. [`EngineError`] wraps validation plus the
//! failures of the storage layer.
//!
//! [`Expense`]: crate::Expense
use sea_orm::DbErr;
use thiserror::Error;

use crate::expenses::MIN_PARTICIPANTS;

/// A specific reason an expense draft cannot become a valid expense.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("an expense needs at least {MIN_PARTICIPANTS} participants")]
    TooFewParticipants,
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
    #[error("share amounts cannot be negative")]
    NegativeShare,
    #[error("contributions sum to {actual:.2} but the expense total is {expected:.2}")]
    SumMismatch { expected: f64, actual: f64 },
    #[error("amounts are derived from the total under an equal split")]
    AmountNotEditable,
}

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("invalid share data: {0}")]
    InvalidShareData(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::InvalidShareData(a), Self::InvalidShareData(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
