use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use railbook_api::{app, AppState};
use railbook_catalog::FareTable;
use railbook_order::{Order, OrderId, OrderRepository, PassengerRegistry};
use railbook_store::{Config, InMemoryTrainRepository};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn test_app() -> Router {
    app(AppState::new(Config::default()).unwrap())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn route_search() -> Value {
    json!({
        "conditions": {
            "fromStation": "北京南",
            "toStation": "上海虹桥",
            "departDate": "2025-01-20"
        }
    })
}

async fn g1234(app: &Router) -> Value {
    let (_, body) = send(app, "POST", "/api/v1/trains/search", Some(route_search())).await;
    body["data"]["trains"][0].clone()
}

#[tokio::test]
async fn test_banner_and_health() {
    let app = test_app();

    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_unknown_route() {
    let app = test_app();

    let (status, body) = send(&app, "GET", "/api/v1/flights", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "API endpoint not found");
    assert_eq!(body["path"], "/api/v1/flights");
}

#[tokio::test]
async fn test_search_sorted_by_departure() {
    let app = test_app();

    let (status, body) = send(&app, "POST", "/api/v1/trains/search", Some(route_search())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["trains"][0]["trainNo"], "G1234");
    assert_eq!(body["data"]["trains"][1]["trainNo"], "G9");
}

#[tokio::test]
async fn test_search_with_filters_and_sort() {
    let app = test_app();

    let mut request = route_search();
    request["filters"] = json!({ "seatTypes": ["second_class"] });
    let (_, body) = send(&app, "POST", "/api/v1/trains/search", Some(request)).await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["trains"][0]["trainNo"], "G1234");

    let request = json!({
        "filters": { "trainTypes": ["D", "Z", "T"] },
        "sort": { "key": "duration", "direction": "desc" }
    });
    let (_, body) = send(&app, "POST", "/api/v1/trains/search", Some(request)).await;
    let numbers: Vec<&str> = body["data"]["trains"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["trainNo"].as_str().unwrap())
        .collect();
    assert_eq!(numbers, vec!["T109", "Z281", "D709"]);
}

#[tokio::test]
async fn test_train_detail() {
    let app = test_app();

    let (status, body) = send(&app, "GET", "/api/v1/trains/G1234?date=2025-01-20", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["train"]["trainNumber"], "G1234");
    assert_eq!(body["data"]["train"]["seatInfo"]["firstClass"]["price"], 933);

    let (status, _) = send(&app, "GET", "/api/v1/trains/G0000", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_passenger_crud() {
    let app = test_app();

    let (_, body) = send(&app, "GET", "/api/v1/passengers", None).await;
    assert_eq!(body["data"]["total"], 2);

    let invalid = json!({ "name": "", "nationalId": "1234", "phone": "13800138000" });
    let (status, body) = send(&app, "POST", "/api/v1/passengers", Some(invalid)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"]["name"], "Name is required");
    assert!(body["fields"]["nationalId"].is_string());
    assert!(body["fields"].get("phone").is_none());

    let valid = json!({
        "name": "王五",
        "nationalId": "110101200001011234",
        "phone": "13912345678",
        "passengerClass": "student"
    });
    let (status, body) = send(&app, "POST", "/api/v1/passengers", Some(valid.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["passenger"]["id"].as_str().unwrap().to_string();

    let mut edited = valid;
    edited["name"] = json!("王小五");
    let (status, body) = send(&app, "PUT", &format!("/api/v1/passengers/{}", id), Some(edited)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["passenger"]["name"], "王小五");

    let (status, _) = send(&app, "DELETE", &format!("/api/v1/passengers/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "DELETE", &format!("/api/v1/passengers/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_order_flow() {
    let app = test_app();
    let train = g1234(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/orders/drafts",
        Some(json!({ "train": train, "seatClass": "secondClass" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let draft_id = body["data"]["draft"]["draftId"].as_str().unwrap().to_string();
    let draft_uri = format!("/api/v1/orders/drafts/{}", draft_id);

    let (status, body) = send(
        &app,
        "POST",
        &format!("{}/passengers", draft_uri),
        Some(json!({ "passengerId": "1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["draft"]["tickets"][0]["price"], 553);
    assert_eq!(body["data"]["draft"]["tickets"][0]["ticketType"], "Adult ticket");
    assert_eq!(body["data"]["draft"]["totalPrice"], 553);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("{}/passengers/1", draft_uri),
        Some(json!({ "seatClass": "firstClass" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["draft"]["totalPrice"], 933);

    let (status, _) = send(
        &app,
        "PUT",
        &format!("{}/passengers/2", draft_uri),
        Some(json!({ "seatClass": "business" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(&app, "POST", &format!("{}/submit", draft_uri), None).await;
    assert_eq!(status, StatusCode::CREATED);
    let order = &body["data"]["order"];
    assert_eq!(order["totalPrice"], 933);
    assert_eq!(order["currency"], "CNY");
    assert_eq!(order["tickets"][0]["seatClass"], "firstClass");
    let order_id = order["orderId"].as_str().unwrap().to_string();
    assert!(order_id.starts_with("ORDER_"));

    // the draft is closed once submitted
    let (status, _) = send(&app, "GET", &draft_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, "GET", "/api/v1/orders", None).await;
    assert_eq!(body["data"]["total"], 1);

    let (status, body) = send(&app, "GET", &format!("/api/v1/orders/{}", order_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["order"]["passengers"][0]["name"], "张三");
}

#[tokio::test]
async fn test_submit_without_passengers() {
    let app = test_app();
    let train = g1234(&app).await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/v1/orders/drafts",
        Some(json!({ "train": train, "seatClass": "secondClass" })),
    )
    .await;
    let draft_id = body["data"]["draft"]["draftId"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "POST", &format!("/api/v1/orders/drafts/{}/submit", draft_id), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please select at least one passenger");
}

#[tokio::test]
async fn test_unbookable_train_rejected() {
    let app = test_app();
    let (_, body) = send(&app, "POST", "/api/v1/trains/search", Some(route_search())).await;
    let g9 = body["data"]["trains"][1].clone();
    assert_eq!(g9["canBook"], false);

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/orders/drafts",
        Some(json!({ "train": g9, "seatClass": "secondClass" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
}

struct BrokenOrderStore;

#[async_trait::async_trait]
impl OrderRepository for BrokenOrderStore {
    async fn create_order(&self, _order: &Order) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Err("order service unavailable".into())
    }

    async fn get_order(&self, _order_id: &OrderId) -> Result<Option<Order>, Box<dyn std::error::Error + Send + Sync>> {
        Err("order service unavailable".into())
    }

    async fn list_orders(&self) -> Result<Vec<Order>, Box<dyn std::error::Error + Send + Sync>> {
        Err("order service unavailable".into())
    }
}

fn broken_app(environment: &str) -> Router {
    let config = Config {
        environment: environment.to_string(),
        ..Config::default()
    };
    let fares = FareTable::default();
    let state = AppState::with_repositories(
        config,
        fares.clone(),
        Arc::new(InMemoryTrainRepository::seeded(fares)),
        Arc::new(BrokenOrderStore),
        PassengerRegistry::with_demo_passengers(),
    );
    app(state)
}

#[tokio::test]
async fn test_submission_failure_is_bad_gateway() {
    let app = broken_app("development");
    let train = g1234(&app).await;
    let (_, body) = send(
        &app,
        "POST",
        "/api/v1/orders/drafts",
        Some(json!({ "train": train, "seatClass": "secondClass" })),
    )
    .await;
    let draft_uri = format!("/api/v1/orders/drafts/{}", body["data"]["draft"]["draftId"].as_str().unwrap());
    send(&app, "POST", &format!("{}/passengers", draft_uri), Some(json!({ "passengerId": "2" }))).await;

    let (status, body) = send(&app, "POST", &format!("{}/submit", draft_uri), None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("order service unavailable"));

    // a failed submission keeps the draft for a retry
    let (status, body) = send(&app, "GET", &draft_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["draft"]["submitting"], false);
    assert_eq!(body["data"]["draft"]["tickets"][0]["passengerName"], "李四");
}

#[tokio::test]
async fn test_internal_error_detail_in_development() {
    let app = broken_app("development");

    let (status, body) = send(&app, "GET", "/api/v1/orders", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal Server Error");
    assert_eq!(body["message"], "order service unavailable");
}

#[tokio::test]
async fn test_internal_error_redacted_in_production() {
    let app = broken_app("production");

    let (status, body) = send(&app, "GET", "/api/v1/orders", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal Server Error");
    assert_eq!(body["message"], "Something went wrong");
}

/// Holds `create_order` until released, then stores the order
#[derive(Default)]
struct GatedOrderStore {
    entered: tokio::sync::Notify,
    release: tokio::sync::Notify,
    orders: std::sync::Mutex<Vec<Order>>,
}

#[async_trait::async_trait]
impl OrderRepository for GatedOrderStore {
    async fn create_order(&self, order: &Order) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.entered.notify_one();
        self.release.notified().await;
        self.orders.lock().unwrap().push(order.clone());
        Ok(())
    }

    async fn get_order(&self, order_id: &OrderId) -> Result<Option<Order>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.orders.lock().unwrap().iter().find(|o| &o.order_id == order_id).cloned())
    }

    async fn list_orders(&self) -> Result<Vec<Order>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.orders.lock().unwrap().clone())
    }
}

#[tokio::test]
async fn test_draft_submitted_once() {
    let store = Arc::new(GatedOrderStore::default());
    let fares = FareTable::default();
    let app = app(AppState::with_repositories(
        Config::default(),
        fares.clone(),
        Arc::new(InMemoryTrainRepository::seeded(fares)),
        store.clone(),
        PassengerRegistry::with_demo_passengers(),
    ));

    let train = g1234(&app).await;
    let (_, body) = send(
        &app,
        "POST",
        "/api/v1/orders/drafts",
        Some(json!({ "train": train, "seatClass": "secondClass" })),
    )
    .await;
    let draft_uri = format!("/api/v1/orders/drafts/{}", body["data"]["draft"]["draftId"].as_str().unwrap());
    send(&app, "POST", &format!("{}/passengers", draft_uri), Some(json!({ "passengerId": "1" }))).await;

    let first = {
        let app = app.clone();
        let uri = format!("{}/submit", draft_uri);
        tokio::spawn(async move { send(&app, "POST", &uri, None).await })
    };
    store.entered.notified().await;

    let (status, _) = send(&app, "POST", &format!("{}/submit", draft_uri), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // edits are refused while the order is being stored
    let (status, _) = send(&app, "POST", &format!("{}/passengers", draft_uri), Some(json!({ "passengerId": "2" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    store.release.notify_one();
    let (status, body) = first.await.unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["order"]["tickets"].as_array().unwrap().len(), 1);

    let (status, _) = send(&app, "POST", &format!("{}/submit", draft_uri), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(store.orders.lock().unwrap().len(), 1);
}
