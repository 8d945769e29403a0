use axum::{
    extract::OriginalUri,
    http::{Method, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod middleware;
pub mod orders;
pub mod passengers;
pub mod state;
pub mod trains;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    let api = Router::new()
        .merge(trains::routes())
        .merge(passengers::routes())
        .merge(orders::routes());

    let prefix = normalize_prefix(&state.config.server.api_prefix);
    let router = Router::new()
        .route("/", get(banner))
        .route("/health", get(health));
    let router = match prefix {
        Some(prefix) => router.nest(&prefix, api),
        None => router.merge(api),
    };

    router
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(middleware::handle_panic))
        .layer(axum::middleware::from_fn_with_state(state.clone(), middleware::redact_internal_errors))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `"/api/v1/"` -> `Some("/api/v1")`; an empty or root prefix mounts at `/`
fn normalize_prefix(prefix: &str) -> Option<String> {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(format!("/{}", trimmed))
    }
}

async fn banner() -> Json<Value> {
    Json(json!({
        "message": "Railbook ticketing API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found(OriginalUri(uri): OriginalUri) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "API endpoint not found",
            "path": uri.path(),
        })),
    )
}
