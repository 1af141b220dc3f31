//! Error types for the shaping pipeline
//!
//! Every failure names the field it is attributable to (where there is one)
//! and carries the offending value.

use serde_json::Value;
use thiserror::Error;

/// Encoding or decoding a record failed
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Serialization error: {message}")]
pub struct SerializationError {
    pub message: String,
}

impl SerializationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A registered transformation produced no usable value
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Transformation error on field '{field}': {message} (value: {value})")]
pub struct TransformationError {
    pub field: String,

    /// Value the field held before the transformation ran
    pub value: Value,

    pub message: String,
}

/// A required field is missing or one of its validators rejected it
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Validation error on field '{field}': {message} (value: {})", display_value(.value))]
pub struct ValidationError {
    pub field: String,

    /// `None` when the field was absent from the mapping
    pub value: Option<Value>,

    pub message: String,
}

impl ValidationError {
    /// Field listed in the validations but absent from the data
    pub fn missing(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: None,
            message: "field is missing".to_string(),
        }
    }

    /// Check if this error reports an absent field rather than a rejected value
    pub fn is_missing(&self) -> bool {
        self.value.is_none()
    }
}

fn display_value(value: &Option<Value>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "null".to_string(),
    }
}

/// Any failure surfaced by [`crate::Serializer::serialize`]
///
/// Validation is a separate pass and reports [`ValidationError`] directly.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error(transparent)]
    Serialization(#[from] SerializationError),

    #[error(transparent)]
    Transformation(#[from] TransformationError),
}

impl ShapeError {
    /// Field the failure is attributable to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            ShapeError::Serialization(_) => None,
            ShapeError::Transformation(e) => Some(&e.field),
        }
    }

    /// Check if this error is retryable
    ///
    /// Shaping is a pure function of its input, so retrying never helps.
    pub fn is_retryable(&self) -> bool {
        match self {
            ShapeError::Serialization(_) => false,
            ShapeError::Transformation(_) => false,
        }
    }
}
