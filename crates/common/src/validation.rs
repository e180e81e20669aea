//! Field-level validation that reports every failure at once.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A validation failure attached to an input field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the offending input field.
    pub field: String,

    /// Human-readable reason.
    pub message: String,
}

impl FieldError {
    /// Creates a new field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Collects the outcome of several independent constructors.
///
/// Unlike `?`, a failed check does not stop the caller: every check runs and
/// every failure is kept, in the order the checks were made.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    /// Creates an empty validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `result` for `field`, returning the value on success.
    pub fn check<T, E>(&mut self, field: &str, result: Result<T, E>) -> Option<T>
    where
        E: fmt::Display,
    {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.errors.push(FieldError::new(field, error.to_string()));
                None
            }
        }
    }

    /// Returns true if no check has failed so far.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the failures recorded so far.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Consumes the validator, returning every recorded failure.
    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}
