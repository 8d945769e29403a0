use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use railbook_core::SearchConditions;
use railbook_search::{view, FilterState, SortState};
use serde::Deserialize;
use serde_json::{json, Value};
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    pub date: Option<NaiveDate>,
}

/// Route conditions pick trains from the timetable; filters and sort shape the list
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    pub conditions: Option<SearchConditions>,
    pub filters: FilterState,
    pub sort: SortState,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/trains/search", post(search_trains))
        .route("/trains/{train_number}", get(get_train))
}

/// GET /trains/{trainNumber}?date=YYYY-MM-DD
async fn get_train(
    State(state): State<AppState>,
    Path(train_number): Path<String>,
    Query(query): Query<DetailQuery>,
) -> Result<Json<Value>, AppError> {
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());

    let train = state
        .train_repo
        .get_train_detail(&train_number, date)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Train not found: {}", train_number)))?;

    Ok(Json(json!({ "data": { "train": train } })))
}

/// POST /trains/search
async fn search_trains(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<Value>, AppError> {
    let conditions = req
        .conditions
        .unwrap_or_else(|| SearchConditions::new("", "", Utc::now().date_naive()));

    let found = state.train_repo.search_trains(&conditions).await?;
    let trains = view(&found, &req.filters, &req.sort);

    tracing::debug!(
        from = %conditions.from_station,
        to = %conditions.to_station,
        found = found.len(),
        shown = trains.len(),
        "Train search"
    );

    Ok(Json(json!({
        "data": {
            "total": trains.len(),
            "trains": trains,
        }
    })))
}
