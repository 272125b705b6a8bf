//! Core error types for the wealth tracker.
//!
//! This module defines the root error enum and the validation errors shared
//! across modules. Domain-specific errors (dictionary, store, fit,
//! inflation) live next to their modules and are wrapped here.

use chrono::{NaiveDate, ParseError as ChronoParseError};
use thiserror::Error;

use crate::dictionary::DictionaryError;
use crate::growth::FitError;
use crate::inflation::InflationError;
use crate::store::StoreError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the analytics core.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Dictionary error: {0}")]
    Dictionary(#[from] DictionaryError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Growth fit failed: {0}")]
    Fit(#[from] FitError),

    #[error("Inflation adjustment failed: {0}")]
    Inflation(#[from] InflationError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Validation errors for snapshot records and batch input.
///
/// These are the only errors recovered from locally: the ingest boundary
/// drops the offending record and continues with the rest of the batch.
/// Inside the store they are strict and leave the store unchanged.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field '{0}' is missing or empty")]
    MissingField(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Record for '{entity_id}' is dated {found}, batch is dated {expected}")]
    DateMismatch {
        entity_id: String,
        expected: NaiveDate,
        found: NaiveDate,
    },

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date: {0}")]
    DateParse(#[from] ChronoParseError),
}

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateParse(err))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
