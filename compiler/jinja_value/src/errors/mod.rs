//! Error types for value access and rendering.
//!
//! `EvalErrorKind` carries the structured category; factory functions
//! (e.g. `invalid_field()`) are the public way to build an `EvalError` and
//! fill both `kind` and `message`.
//!
//! None of these errors are caught by the statement layer. They propagate to
//! the caller of the render, and text already written to the sink stays
//! written.

use crate::value::Value;
use std::fmt;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    /// A named field is absent from a reflected aggregate's accessor table.
    InvalidField { field: String },
    /// A map-only (or list-only) operation was applied to the wrong variant.
    TypeMismatch { expected: String, got: String },
    /// Ordinal access past the end of an accessor.
    IndexOutOfBounds { index: usize, len: usize },

    UndefinedFunction { name: String },
    UndefinedMethod { method: String, type_name: String },
    WrongArgCount {
        name: String,
        min: usize,
        max: usize,
        got: usize,
    },

    /// Nested scopes went past the configured limit.
    ScopeDepthExceeded { limit: usize },

    /// Catch-all for errors without a structured kind.
    Custom { message: String },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidField { field } => write!(f, "invalid field access: {field}"),
            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds (size {len})")
            }
            Self::UndefinedFunction { name } => write!(f, "undefined function: {name}"),
            Self::UndefinedMethod { method, type_name } => {
                write!(f, "no method '{method}' on type {type_name}")
            }
            Self::WrongArgCount {
                name,
                min,
                max,
                got,
            } => {
                if min == max {
                    let arg_word = if *min == 1 { "argument" } else { "arguments" };
                    write!(f, "{name} expects {min} {arg_word}, got {got}")
                } else {
                    write!(f, "{name} expects {min} to {max} arguments, got {got}")
                }
            }
            Self::ScopeDepthExceeded { limit } => {
                write!(f, "maximum scope depth exceeded (limit: {limit})")
            }
            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable error message, equal to `kind.to_string()` for
    /// factory-created errors.
    pub message: String,
}

impl EvalError {
    /// Create an error with just a message.
    ///
    /// Uses `Custom` kind. Prefer the factory functions when a structured
    /// kind fits.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: EvalErrorKind::Custom {
                message: message.clone(),
            },
            message,
        }
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self { kind, message }
    }

    /// Whether this is an invalid-field error.
    pub fn is_invalid_field(&self) -> bool {
        matches!(self.kind, EvalErrorKind::InvalidField { .. })
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

// Factory functions

/// Field absent from a reflected aggregate.
#[cold]
pub fn invalid_field(field: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidField {
        field: field.to_string(),
    })
}

#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

#[cold]
pub fn index_out_of_bounds(index: usize, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds { index, len })
}

#[cold]
pub fn undefined_function(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedFunction {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_method(method: &str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedMethod {
        method: method.to_string(),
        type_name: type_name.to_string(),
    })
}

/// Call with an argument count outside `min..=max`.
#[cold]
pub fn wrong_arg_count(name: &str, min: usize, max: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::WrongArgCount {
        name: name.to_string(),
        min,
        max,
        got,
    })
}

#[cold]
pub fn scope_depth_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ScopeDepthExceeded { limit })
}

#[cfg(test)]
mod tests;
