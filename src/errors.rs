//! Error types for domain operations
//!
//! Every failure in this crate surfaces as a [`DomainError`] carrying a stable
//! string code and a human-readable message. Validation failures across value
//! objects, entities and domain events use [`DomainError::ArgumentInvalid`];
//! the strict JSON export path uses [`DomainError::InvalidInput`].

use indexmap::IndexMap;
use thiserror::Error;

/// Module name prefixed to every error code of this crate
pub const ERROR_MODULE: &str = "ddd";

/// Stable code for [`DomainError::ArgumentInvalid`]
pub const ARGUMENT_INVALID_CODE: &str = "ddd/argument-invalid";

/// Stable code for [`DomainError::InvalidInput`]
pub const INVALID_INPUT_CODE: &str = "ddd/invalid-input";

const ARGUMENT_INVALID_DEFAULT_MESSAGE: &str = "Argument is invalid";

/// Errors that can occur in domain operations
///
/// The display form is the bare message so callers can match on the text a
/// `validate` implementation supplied. Use [`DomainError::to_string_with_code`]
/// for the `Name (code): message` rendering.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    /// Construction or validation failure: undefined input, empty props,
    /// failed subtype validation, invalid event fields
    #[error("{0}")]
    ArgumentInvalid(String),

    /// Strict JSON conversion encountered a non-serializable value
    #[error("{0}")]
    InvalidInput(String),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Create an [`DomainError::ArgumentInvalid`] with a custom message
    pub fn argument_invalid(msg: impl Into<String>) -> Self {
        DomainError::ArgumentInvalid(msg.into())
    }

    /// Create an [`DomainError::ArgumentInvalid`] with the library default message
    pub fn argument_invalid_default() -> Self {
        DomainError::ArgumentInvalid(ARGUMENT_INVALID_DEFAULT_MESSAGE.to_string())
    }

    /// Create an [`DomainError::InvalidInput`] with a custom message
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        DomainError::InvalidInput(msg.into())
    }

    /// Stable string code identifying the error kind
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::ArgumentInvalid(_) => ARGUMENT_INVALID_CODE,
            DomainError::InvalidInput(_) => INVALID_INPUT_CODE,
        }
    }

    /// Error name matching the code
    pub fn name(&self) -> &'static str {
        match self {
            DomainError::ArgumentInvalid(_) => "ArgumentInvalidError",
            DomainError::InvalidInput(_) => "InvalidInputError",
        }
    }

    /// The human-readable message
    pub fn message(&self) -> &str {
        match self {
            DomainError::ArgumentInvalid(msg) | DomainError::InvalidInput(msg) => msg,
        }
    }

    /// Render as `Name (code): message`
    pub fn to_string_with_code(&self) -> String {
        format!("{} ({}): {}", self.name(), self.code(), self.message())
    }

    /// Check if this is a validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(self, DomainError::ArgumentInvalid(_))
    }
}

/// Options for [`create_error_codes`]
#[derive(Debug, Clone)]
pub struct ErrorCodeOptions<'a> {
    /// Module name prefixed to every code; empty for bare codes
    pub module_name: &'a str,
    /// Separator between module name and source
    pub delimiter: &'a str,
}

impl Default for ErrorCodeOptions<'_> {
    fn default() -> Self {
        Self {
            module_name: "",
            delimiter: "/",
        }
    }
}

/// Build a code table mapping each error source to its namespaced code
///
/// Sources keep their declaration order in the returned table.
pub fn create_error_codes(
    sources: &[&str],
    options: &ErrorCodeOptions<'_>,
) -> IndexMap<String, String> {
    sources
        .iter()
        .map(|source| {
            let code = if options.module_name.is_empty() {
                (*source).to_string()
            } else {
                format!("{}{}{}", options.module_name, options.delimiter, source)
            };
            ((*source).to_string(), code)
        })
        .collect()
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::InvalidInput(err.to_string())
    }
}
