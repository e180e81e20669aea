//! API error types with HTTP response mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::WorkflowError;
use thiserror::Error;

/// API-level error type that maps to HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A workflow rejected the request.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// The request body is not a JSON object of the expected shape.
    #[error(transparent)]
    Body(#[from] JsonRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Workflow(err) => match err {
                WorkflowError::Validation { .. } | WorkflowError::InvalidId { .. } => {
                    StatusCode::BAD_REQUEST
                }
                WorkflowError::NotFound => StatusCode::NOT_FOUND,
                WorkflowError::InvalidState { .. } => StatusCode::CONFLICT,
            },
            ApiError::Body(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(%status, error = %self, "request rejected");

        let body = match self {
            ApiError::Workflow(err) => {
                serde_json::json!({ "error": err.to_string(), "details": err })
            }
            ApiError::Body(rejection) => serde_json::json!({
                "error": rejection.body_text(),
                "details": { "type": "InvalidBody" },
            }),
        };
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::TodoStatus;

    #[test]
    fn maps_workflow_errors_to_status() {
        let cases = [
            (
                WorkflowError::Validation { errors: Vec::new() },
                StatusCode::BAD_REQUEST,
            ),
            (
                WorkflowError::InvalidId {
                    message: "Invalid todo id".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (WorkflowError::NotFound, StatusCode::NOT_FOUND),
            (
                WorkflowError::InvalidState {
                    expected: "Active",
                    actual: TodoStatus::Completed,
                },
                StatusCode::CONFLICT,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }
}
