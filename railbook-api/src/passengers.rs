use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use railbook_core::{PassengerFields, PassengerId};
use serde_json::{json, Value};
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/passengers", get(list_passengers).post(add_passenger))
        .route("/passengers/{id}", put(edit_passenger).delete(remove_passenger))
}

async fn list_passengers(State(state): State<AppState>) -> Json<Value> {
    let registry = state.passengers.read().await;

    Json(json!({
        "data": {
            "total": registry.len(),
            "passengers": registry.list(),
        }
    }))
}

async fn add_passenger(
    State(state): State<AppState>,
    Json(fields): Json<PassengerFields>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let passenger = state.passengers.write().await.add(fields)?;

    Ok((StatusCode::CREATED, Json(json!({ "data": { "passenger": passenger } }))))
}

async fn edit_passenger(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(fields): Json<PassengerFields>,
) -> Result<Json<Value>, AppError> {
    let passenger = state.passengers.write().await.edit(&PassengerId::from(id), fields)?;

    Ok(Json(json!({ "data": { "passenger": passenger } })))
}

/// Orders and open drafts keep their own copies, so removal never reaches them
async fn remove_passenger(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let passenger = state.passengers.write().await.remove(&PassengerId::from(id))?;

    Ok(Json(json!({ "data": { "passenger": passenger } })))
}
