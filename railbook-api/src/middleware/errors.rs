use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::any::Any;
use crate::error::{internal_body, AppError};
use crate::state::AppState;

pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// Turns a handler panic into the regular 500 JSON body
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };

    AppError::InternalServerError(detail).into_response()
}

/// Outside development, 500 responses never carry the underlying error text
pub async fn redact_internal_errors(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let response = next.run(req).await;

    if response.status() != StatusCode::INTERNAL_SERVER_ERROR || state.config.is_development() {
        return response;
    }

    (StatusCode::INTERNAL_SERVER_ERROR, Json(internal_body(GENERIC_ERROR_MESSAGE))).into_response()
}
