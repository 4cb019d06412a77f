//! Validation pipeline
//!
//! Every `validate` callback supplied by a concrete value object, entity or
//! domain event subtype reports through [`ValidationResult`], and
//! [`handle_validation_result`] is the single choke point that normalizes the
//! outcome into a typed error — behavior is uniform across all three kinds.

use std::error::Error;

use crate::errors::{DomainError, DomainResult};

/// Outcome of a subtype-supplied `validate` callback
///
/// A lightweight way to signal either "ok" or "failed, here's why" without
/// constructing a full error taxonomy every time.
#[derive(Debug)]
pub enum ValidationResult {
    /// Validation passed
    Valid,
    /// Generic failure without a message
    Invalid,
    /// Failure described by a message
    Message(String),
    /// A library-typed error, rethrown unchanged with its own code intact
    Domain(DomainError),
    /// Any other error; only its message survives normalization
    Error(Box<dyn Error + Send + Sync>),
}

/// Normalize a validation outcome into a typed error
///
/// - [`Valid`](ValidationResult::Valid) returns normally.
/// - [`Domain`](ValidationResult::Domain) errors pass through unchanged,
///   preserving their own code.
/// - Any other [`Error`](ValidationResult::Error) is narrowed to
///   [`DomainError::ArgumentInvalid`] carrying only its message.
/// - A [`Message`](ValidationResult::Message) becomes
///   [`DomainError::ArgumentInvalid`] with that message.
/// - [`Invalid`](ValidationResult::Invalid) becomes
///   [`DomainError::ArgumentInvalid`] with the library default message.
pub fn handle_validation_result(result: ValidationResult) -> DomainResult<()> {
    match result {
        ValidationResult::Valid => Ok(()),
        ValidationResult::Domain(err) => Err(err),
        ValidationResult::Error(err) => Err(DomainError::argument_invalid(err.to_string())),
        ValidationResult::Message(msg) => Err(DomainError::argument_invalid(msg)),
        ValidationResult::Invalid => Err(DomainError::argument_invalid_default()),
    }
}

impl From<bool> for ValidationResult {
    fn from(ok: bool) -> Self {
        if ok {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid
        }
    }
}

impl From<&str> for ValidationResult {
    fn from(msg: &str) -> Self {
        ValidationResult::Message(msg.to_string())
    }
}

impl From<String> for ValidationResult {
    fn from(msg: String) -> Self {
        ValidationResult::Message(msg)
    }
}

impl From<DomainError> for ValidationResult {
    fn from(err: DomainError) -> Self {
        ValidationResult::Domain(err)
    }
}
