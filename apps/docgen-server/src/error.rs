//! Error types for the docgen server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use docx_engine::GenerateError;
use serde::Serialize;
use thiserror::Error;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Validation failed for '{template_id}'")]
    ValidationFailed {
        template_id: String,
        missing_fields: Vec<String>,
    },

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Generation timeout after {0}ms")]
    Timeout(u64),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    missing_fields: Option<Vec<String>>,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ServerError::TemplateNotFound(id) => (
                StatusCode::NOT_FOUND,
                "TEMPLATE_NOT_FOUND",
                format!("Template '{}' not found", id),
            ),
            ServerError::ValidationFailed {
                template_id,
                missing_fields,
            } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_FAILED",
                format!(
                    "Missing required fields for '{}': {}",
                    template_id,
                    missing_fields.join(", ")
                ),
            ),
            ServerError::Generation(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "GENERATION_ERROR",
                msg.clone(),
            ),
            ServerError::Timeout(ms) => (
                StatusCode::REQUEST_TIMEOUT,
                "TIMEOUT",
                format!("Generation timeout after {}ms", ms),
            ),
            ServerError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg.clone())
            }
            ServerError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg.clone(),
            ),
        };

        let missing_fields = match self {
            ServerError::ValidationFailed { missing_fields, .. } => Some(missing_fields),
            _ => None,
        };

        let body = ErrorResponse {
            success: false,
            error: message,
            code: code.to_string(),
            missing_fields,
        };

        (status, Json(body)).into_response()
    }
}

impl From<GenerateError> for ServerError {
    fn from(err: GenerateError) -> Self {
        match err {
            GenerateError::TemplateNotFound(id) => ServerError::TemplateNotFound(id),
            GenerateError::Validation(e) => ServerError::ValidationFailed {
                missing_fields: e.field_names(),
                template_id: e.template_id,
            },
            other => ServerError::Generation(other.to_string()),
        }
    }
}
