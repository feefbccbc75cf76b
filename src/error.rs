// Error types for summary validation and conversion
use serde_json::Value;
use thiserror::Error;

/// Every rule violation found while strictly validating a summary candidate.
///
/// The list is complete: validation never stops at the first failure, so a
/// form can highlight every bad field at once.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Invalid summary data: {}", .errors.join(", "))]
pub struct ValidationError {
    pub errors: Vec<String>,
}

impl ValidationError {
    pub fn new(errors: Vec<String>) -> Self {
        Self { errors }
    }
}

/// Failure to coerce a legacy candidate into a canonical record.
///
/// Carries the untouched candidate so callers can report what was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Failed to convert legacy summary format: {message}")]
pub struct ConversionError {
    pub message: String,
    pub candidate: Value,
}

impl ConversionError {
    pub fn new(message: impl Into<String>, candidate: Value) -> Self {
        Self {
            message: message.into(),
            candidate,
        }
    }
}
