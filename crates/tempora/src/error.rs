//! Error types for tempora operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemporaError {
    #[error("Invalid interval unit: {0}")]
    InvalidIntervalUnit(String),

    #[error("Invalid step: {0}")]
    InvalidStep(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Unknown filter method: {0} does not exist on Moment")]
    UnknownFilterMethod(String),

    #[error("Not a predicate method: {0} is not a zero-argument boolean query on Moment")]
    NotAPredicateMethod(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    #[error("Invalid format style: {0}")]
    InvalidFormatStyle(String),
}

pub type Result<T> = std::result::Result<T, TemporaError>;
