//! Workflow error types.

use common::FieldError;
use serde::Serialize;
use thiserror::Error;

use crate::todo::TodoStatus;

/// Errors a workflow can end with.
///
/// These are values: no workflow panics to signal a domain failure, and
/// nothing is persisted or announced once one of these is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "type")]
pub enum WorkflowError {
    /// One or more inputs failed validation. Every failing field is listed.
    #[error("Validation failed: {}", join_errors(.errors))]
    Validation { errors: Vec<FieldError> },

    /// The identifier is malformed.
    #[error("Invalid id: {message}")]
    InvalidId { message: String },

    /// No todo exists with that identifier.
    #[error("Todo not found")]
    NotFound,

    /// The todo is not in a phase the transition accepts.
    #[error("Invalid state: expected {expected}, was {actual}")]
    InvalidState {
        expected: &'static str,
        actual: TodoStatus,
    },
}

impl WorkflowError {
    pub(crate) fn invalid_state(expected: &'static str, actual: TodoStatus) -> Self {
        WorkflowError::InvalidState { expected, actual }
    }

    /// Returns the variant name, as used in the serialized `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            WorkflowError::Validation { .. } => "Validation",
            WorkflowError::InvalidId { .. } => "InvalidId",
            WorkflowError::NotFound => "NotFound",
            WorkflowError::InvalidState { .. } => "InvalidState",
        }
    }
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
