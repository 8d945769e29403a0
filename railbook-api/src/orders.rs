use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use railbook_catalog::SeatClass;
use railbook_core::{Passenger, PassengerId, TrainInfo};
use railbook_order::{validate_submission, ComposerEvent, OrderError, OrderId, TicketComposer, TicketLine};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;
use crate::error::AppError;
use crate::state::{AppState, Draft};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDraftRequest {
    pub train: TrainInfo,
    pub seat_class: SeatClass,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectPassengerRequest {
    pub passenger_id: PassengerId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSeatClassRequest {
    pub seat_class: SeatClass,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftResponse {
    pub draft_id: Uuid,
    pub train: TrainInfo,
    pub seat_class: SeatClass,
    pub passengers: Vec<Passenger>,
    pub tickets: Vec<TicketLine>,
    pub total_price: i32,
    pub submitting: bool,
}

impl DraftResponse {
    fn new(draft_id: Uuid, composer: &TicketComposer, submitting: bool) -> Self {
        Self {
            draft_id,
            train: composer.train().clone(),
            seat_class: composer.shown_seat_class(),
            passengers: composer.selected_passengers().to_vec(),
            tickets: composer.lines().to_vec(),
            total_price: composer.total_price(),
            submitting,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders))
        .route("/orders/drafts", post(create_draft))
        .route("/orders/drafts/{id}", get(get_draft))
        .route("/orders/drafts/{id}/passengers", post(select_passenger))
        .route(
            "/orders/drafts/{id}/passengers/{passenger_id}",
            put(change_seat_class).delete(deselect_passenger),
        )
        .route("/orders/drafts/{id}/submit", post(submit_draft))
        .route("/orders/{order_id}", get(get_order))
}

async fn find_draft(state: &AppState, id: Uuid) -> Result<Arc<Draft>, AppError> {
    state
        .drafts
        .read()
        .await
        .get(&id)
        .cloned()
        .ok_or_else(|| AppError::NotFoundError(format!("Order draft not found: {}", id)))
}

async fn draft_response(id: Uuid, draft: &Draft) -> Json<Value> {
    let composer = draft.composer.lock().await;
    let view = DraftResponse::new(id, &composer, draft.submitter.is_submitting());
    Json(json!({ "data": { "draft": view } }))
}

/// Apply one composer event under the registry read lock
async fn apply_event(state: &AppState, id: Uuid, event: ComposerEvent) -> Result<Json<Value>, AppError> {
    let draft = find_draft(state, id).await?;
    {
        let registry = state.passengers.read().await;
        let mut composer = draft.composer.lock().await;
        ensure_editable(&draft)?;
        composer.apply(&registry, event)?;
    }
    Ok(draft_response(id, &draft).await)
}

/// Submission claims the draft under the composer lock, so checking here
/// while holding that lock keeps edits out of an order being stored.
fn ensure_editable(draft: &Draft) -> Result<(), AppError> {
    if draft.submitter.is_submitted() {
        return Err(OrderError::AlreadySubmitted.into());
    }
    if draft.submitter.is_submitting() {
        return Err(OrderError::SubmissionInFlight.into());
    }
    Ok(())
}

/// POST /orders/drafts
/// Open an order draft for a train picked from the list
async fn create_draft(
    State(state): State<AppState>,
    Json(req): Json<CreateDraftRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    if !req.train.can_book {
        return Err(AppError::ConflictError(format!("Train {} is not bookable", req.train.train_no)));
    }

    let id = Uuid::new_v4();
    let composer = TicketComposer::new(req.train, req.seat_class, state.fares.clone());
    let draft = Arc::new(state.new_draft(composer));
    state.drafts.write().await.insert(id, draft.clone());

    tracing::debug!(draft_id = %id, "Order draft opened");
    Ok((StatusCode::CREATED, draft_response(id, &draft).await))
}

/// GET /orders/drafts/{id}
async fn get_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let draft = find_draft(&state, id).await?;
    Ok(draft_response(id, &draft).await)
}

/// POST /orders/drafts/{id}/passengers
async fn select_passenger(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SelectPassengerRequest>,
) -> Result<Json<Value>, AppError> {
    apply_event(&state, id, ComposerEvent::Select { passenger_id: req.passenger_id }).await
}

/// DELETE /orders/drafts/{id}/passengers/{passengerId}
async fn deselect_passenger(
    State(state): State<AppState>,
    Path((id, passenger_id)): Path<(Uuid, String)>,
) -> Result<Json<Value>, AppError> {
    let event = ComposerEvent::Deselect { passenger_id: PassengerId::from(passenger_id) };
    apply_event(&state, id, event).await
}

/// PUT /orders/drafts/{id}/passengers/{passengerId}
async fn change_seat_class(
    State(state): State<AppState>,
    Path((id, passenger_id)): Path<(Uuid, String)>,
    Json(req): Json<ChangeSeatClassRequest>,
) -> Result<Json<Value>, AppError> {
    let event = ComposerEvent::ChangeSeatClass {
        passenger_id: PassengerId::from(passenger_id),
        seat_class: req.seat_class,
    };
    apply_event(&state, id, event).await
}

/// POST /orders/drafts/{id}/submit
/// A successful submission closes the draft
async fn submit_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let draft = find_draft(&state, id).await?;

    // Claim and snapshot together so no edit lands between them; the
    // composer lock is released before the order is stored
    let (submission, train, passengers, tickets) = {
        let composer = draft.composer.lock().await;
        let passengers = composer.selected_passengers().to_vec();
        let tickets = composer.lines().to_vec();
        validate_submission(&passengers, &tickets)?;
        let submission = draft.submitter.begin()?;
        (submission, composer.train().clone(), passengers, tickets)
    };

    let order = submission.store(&train, &passengers, &tickets).await?;
    state.drafts.write().await.remove(&id);

    Ok((StatusCode::CREATED, Json(json!({ "data": { "order": order } }))))
}

/// GET /orders
async fn list_orders(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let orders = state.order_repo.list_orders().await?;

    Ok(Json(json!({
        "data": {
            "total": orders.len(),
            "orders": orders,
        }
    })))
}

/// GET /orders/{orderId}
async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let order_id = OrderId(order_id);
    let order = state
        .order_repo
        .get_order(&order_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Order not found: {}", order_id)))?;

    Ok(Json(json!({ "data": { "order": order } })))
}
