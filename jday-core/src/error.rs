//! Conversion errors
//!
//! Validation and conversion either fully succeed or return one of these.
//! Each error carries a machine-readable code and a severity so callers can
//! tell recoverable input problems from algorithm defects.

use crate::datetime::DateTimeField;
use crate::NumberError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INVALID_FIELD: &str = "INVALID_FIELD";
    pub const OVERFLOW: &str = "OVERFLOW";
    pub const INTERNAL_INCONSISTENCY: &str = "INTERNAL_INCONSISTENCY";
    // Numeric-layer error codes
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const DIV_ZERO: &str = "DIV_ZERO";
    pub const DOMAIN_ERROR: &str = "DOMAIN_ERROR";
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Bad input; report it to the caller
    Error,
    /// An algorithmic invariant broke; not recoverable by retrying
    Fatal,
}

/// Error returned by validation and by the day number converters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("Invalid {field}: {value} is out of range")]
    InvalidField { field: DateTimeField, value: i64 },

    #[error("Overflow: {0} does not fit the target integer width")]
    Overflow(String),

    #[error("Internal inconsistency: {0}")]
    InternalInconsistency(String),

    #[error(transparent)]
    Number(#[from] NumberError),
}

impl ConversionError {
    pub fn invalid_field(field: DateTimeField, value: impl Into<i64>) -> Self {
        Self::InvalidField { field, value: value.into() }
    }

    pub fn overflow(what: impl Into<String>) -> Self {
        Self::Overflow(what.into())
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::InternalInconsistency(details.into())
    }

    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidField { .. } => codes::INVALID_FIELD,
            Self::Overflow(_) => codes::OVERFLOW,
            Self::InternalInconsistency(_) => codes::INTERNAL_INCONSISTENCY,
            Self::Number(NumberError::ParseError(_)) => codes::PARSE_ERROR,
            Self::Number(NumberError::DivisionByZero) => codes::DIV_ZERO,
            Self::Number(NumberError::DomainError(_)) => codes::DOMAIN_ERROR,
            Self::Number(NumberError::Overflow) => codes::OVERFLOW,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::InternalInconsistency(_) => Severity::Fatal,
            _ => Severity::Error,
        }
    }

    /// The offending field, for `InvalidField` errors
    pub fn field(&self) -> Option<DateTimeField> {
        match self {
            Self::InvalidField { field, .. } => Some(*field),
            _ => None,
        }
    }
}
