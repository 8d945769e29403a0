use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use railbook_core::FieldErrors;
use railbook_order::{ComposeError, OrderError, RegistryError};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    FieldValidation(FieldErrors),
    NotFoundError(String),
    ConflictError(String),
    UpstreamError(String),
    InternalServerError(String),
    Anyhow(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::FieldValidation(fields) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Validation failed", "fields": fields }),
            ),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, json!({ "error": msg })),
            AppError::UpstreamError(msg) => (StatusCode::BAD_GATEWAY, json!({ "error": msg })),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, internal_body(&msg))
            }
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, internal_body(&format!("{:#}", err)))
            }
        };

        (status, Json(body)).into_response()
    }
}

/// 500 body; the message is replaced outside development
pub fn internal_body(message: &str) -> serde_json::Value {
    json!({
        "error": "Internal Server Error",
        "message": message,
    })
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Anyhow(err)
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for AppError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Self::InternalServerError(err.to_string())
    }
}

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(_) => Self::NotFoundError(err.to_string()),
            RegistryError::DuplicateId(_) => Self::ConflictError(err.to_string()),
            RegistryError::Invalid(fields) => Self::FieldValidation(fields),
        }
    }
}

impl From<ComposeError> for AppError {
    fn from(err: ComposeError) -> Self {
        match err {
            ComposeError::UnknownPassenger(_) => Self::NotFoundError(err.to_string()),
            ComposeError::NotSelected(_) => Self::ConflictError(err.to_string()),
        }
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NoPassengerSelected | OrderError::IncompleteTicketInfo => {
                Self::ValidationError(err.to_string())
            }
            OrderError::SubmissionInFlight | OrderError::AlreadySubmitted => Self::ConflictError(err.to_string()),
            OrderError::SubmissionFailed { .. } => Self::UpstreamError(err.to_string()),
        }
    }
}
