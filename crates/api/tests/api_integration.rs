//! Integration tests for the API server.

use std::sync::OnceLock;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::{Value, json};
use store::InMemoryStore;
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            metrics_exporter_prometheus::PrometheusBuilder::new()
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup() -> Router {
    let store = InMemoryStore::new();
    let state = api::create_state(store);
    api::create_app(state, get_metrics_handle())
}

async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(value) => builder.body(Body::from(value.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn seed_customer(app: &Router, email: &str) -> Value {
    let (status, body) = request(
        app,
        "POST",
        "/customers",
        Some(json!({
            "name": "Ada Lovelace",
            "email": email,
            "phone": "555-0100",
            "address": "12 Analytical Row"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

async fn seed_product(app: &Router, name: &str, price_cents: i64, stock: i64) -> Value {
    let (status, body) = request(
        app,
        "POST",
        "/products",
        Some(json!({
            "name": name,
            "price_cents": price_cents,
            "stock_quantity": stock
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

async fn stock_of(app: &Router, product_id: &str) -> i64 {
    let (status, body) = request(app, "GET", &format!("/products/{product_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    body["stock_quantity"].as_i64().unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = setup();

    let (status, body) = request(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_customer_crud() {
    let app = setup();

    let created = seed_customer(&app, "ada@example.com").await;
    let id = created["id"].as_str().unwrap();

    let (status, fetched) = request(&app, "GET", &format!("/customers/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["email"], "ada@example.com");

    let (status, updated) = request(
        &app,
        "PUT",
        &format!("/customers/{id}"),
        Some(json!({
            "name": "Ada King",
            "email": "ada@example.com"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Ada King");

    let (status, _) = request(&app, "DELETE", &format!("/customers/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = request(&app, "GET", &format!("/customers/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_email_is_a_bad_request() {
    let app = setup();
    seed_customer(&app, "ada@example.com").await;

    let (status, body) = request(
        &app,
        "POST",
        "/customers",
        Some(json!({
            "name": "Other Ada",
            "email": "ada@example.com"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("Email already exists")
    );
}

#[tokio::test]
async fn test_validation_failures_name_the_field() {
    let app = setup();

    let (status, body) = request(
        &app,
        "POST",
        "/customers",
        Some(json!({ "name": "", "email": "ada@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("name"));

    let (status, body) = request(
        &app,
        "POST",
        "/products",
        Some(json!({ "name": "Widget", "price_cents": -1, "stock_quantity": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("price_cents"));
}

#[tokio::test]
async fn test_product_search_and_in_stock() {
    let app = setup();
    seed_product(&app, "Blue Widget", 1500, 10).await;
    seed_product(&app, "Gadget", 900, 0).await;

    let (status, body) = request(&app, "GET", "/products/search?name=widget", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Blue Widget");

    let (status, body) = request(&app, "GET", "/products/in-stock", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Blue Widget");
}

#[tokio::test]
async fn test_create_order_reserves_stock() {
    let app = setup();
    let customer = seed_customer(&app, "ada@example.com").await;
    let product = seed_product(&app, "Widget", 1999, 100).await;
    let product_id = product["id"].as_str().unwrap();

    let (status, order) = request(
        &app,
        "POST",
        "/orders",
        Some(json!({
            "customer_id": customer["id"],
            "items": [{ "product_id": product_id, "quantity": 2 }]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["status"], "PENDING");
    assert_eq!(order["customer_name"], "Ada Lovelace");
    assert_eq!(order["total_cents"], 2 * 1999);
    assert_eq!(order["items"][0]["product_name"], "Widget");
    assert_eq!(order["items"][0]["unit_price_cents"], 1999);
    assert_eq!(order["items"][0]["subtotal_cents"], 2 * 1999);

    assert_eq!(stock_of(&app, product_id).await, 98);

    // Round trip through the single-order lookup.
    let order_id = order["id"].as_str().unwrap();
    let (status, fetched) = request(&app, "GET", &format!("/orders/{order_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["items"][0]["quantity"], 2);
    assert_eq!(fetched["status"], "PENDING");
}

#[tokio::test]
async fn test_insufficient_stock_leaves_no_trace() {
    let app = setup();
    let customer = seed_customer(&app, "ada@example.com").await;
    let product = seed_product(&app, "Widget", 1999, 100).await;
    let product_id = product["id"].as_str().unwrap();

    let (status, body) = request(
        &app,
        "POST",
        "/orders",
        Some(json!({
            "customer_id": customer["id"],
            "items": [{ "product_id": product_id, "quantity": 999 }]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("Insufficient stock for product: Widget")
    );

    assert_eq!(stock_of(&app, product_id).await, 100);

    let (status, orders) = request(&app, "GET", "/orders", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(orders.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_order_for_unknown_customer_is_not_found() {
    let app = setup();
    let product = seed_product(&app, "Widget", 1999, 10).await;

    let (status, _) = request(
        &app,
        "POST",
        "/orders",
        Some(json!({
            "customer_id": "00000000-0000-0000-0000-000000000000",
            "items": [{ "product_id": product["id"], "quantity": 1 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cancel_restores_stock_exactly_once() {
    let app = setup();
    let customer = seed_customer(&app, "ada@example.com").await;
    let product = seed_product(&app, "Widget", 1999, 100).await;
    let product_id = product["id"].as_str().unwrap();

    let (_, order) = request(
        &app,
        "POST",
        "/orders",
        Some(json!({
            "customer_id": customer["id"],
            "items": [{ "product_id": product_id, "quantity": 2 }]
        })),
    )
    .await;
    let order_id = order["id"].as_str().unwrap();
    assert_eq!(stock_of(&app, product_id).await, 98);

    let (status, cancelled) = request(
        &app,
        "PUT",
        &format!("/orders/{order_id}/status"),
        Some(json!({ "status": "CANCELLED" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "CANCELLED");
    assert_eq!(stock_of(&app, product_id).await, 100);

    // A second cancellation is rejected and must not credit stock again.
    let (status, body) = request(
        &app,
        "PUT",
        &format!("/orders/{order_id}/status"),
        Some(json!({ "status": "CANCELLED" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("cancelled order")
    );
    assert_eq!(stock_of(&app, product_id).await, 100);
}

#[tokio::test]
async fn test_status_filter_endpoint() {
    let app = setup();
    let customer = seed_customer(&app, "ada@example.com").await;
    let product = seed_product(&app, "Widget", 1999, 10).await;

    let (_, order) = request(
        &app,
        "POST",
        "/orders",
        Some(json!({
            "customer_id": customer["id"],
            "items": [{ "product_id": product["id"], "quantity": 1 }]
        })),
    )
    .await;
    let order_id = order["id"].as_str().unwrap();

    let (status, pending) = request(&app, "GET", "/orders/status/PENDING", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pending.as_array().unwrap().len(), 1);

    request(
        &app,
        "PUT",
        &format!("/orders/{order_id}/status"),
        Some(json!({ "status": "SHIPPED" })),
    )
    .await;

    let (_, pending) = request(&app, "GET", "/orders/status/PENDING", None).await;
    assert!(pending.as_array().unwrap().is_empty());
    let (_, shipped) = request(&app, "GET", "/orders/status/SHIPPED", None).await;
    assert_eq!(shipped.as_array().unwrap().len(), 1);

    // Tokens are exact uppercase strings.
    let (status, _) = request(&app, "GET", "/orders/status/shipped", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_orders_by_customer() {
    let app = setup();
    let ada = seed_customer(&app, "ada@example.com").await;
    let grace = seed_customer(&app, "grace@example.com").await;
    let product = seed_product(&app, "Widget", 1999, 10).await;

    request(
        &app,
        "POST",
        "/orders",
        Some(json!({
            "customer_id": ada["id"],
            "items": [{ "product_id": product["id"], "quantity": 1 }]
        })),
    )
    .await;

    let ada_id = ada["id"].as_str().unwrap();
    let grace_id = grace["id"].as_str().unwrap();

    let (status, body) = request(&app, "GET", &format!("/orders/customer/{ada_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) =
        request(&app, "GET", &format!("/orders/customer/{grace_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_order_rules() {
    let app = setup();
    let customer = seed_customer(&app, "ada@example.com").await;
    let product = seed_product(&app, "Widget", 1999, 100).await;
    let product_id = product["id"].as_str().unwrap();

    let (_, order) = request(
        &app,
        "POST",
        "/orders",
        Some(json!({
            "customer_id": customer["id"],
            "items": [{ "product_id": product_id, "quantity": 2 }]
        })),
    )
    .await;
    let order_id = order["id"].as_str().unwrap();

    // A processing order cannot be deleted; order and stock stay as they are.
    request(
        &app,
        "PUT",
        &format!("/orders/{order_id}/status"),
        Some(json!({ "status": "PROCESSING" })),
    )
    .await;
    let (status, body) = request(&app, "DELETE", &format!("/orders/{order_id}"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("already being processed")
    );
    assert_eq!(stock_of(&app, product_id).await, 98);

    // Back to PENDING (progression is permissive), then delete restores stock.
    request(
        &app,
        "PUT",
        &format!("/orders/{order_id}/status"),
        Some(json!({ "status": "PENDING" })),
    )
    .await;
    let (status, _) = request(&app, "DELETE", &format!("/orders/{order_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(stock_of(&app, product_id).await, 100);

    let (status, _) = request(&app, "GET", &format!("/orders/{order_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_a_referenced_customer_conflicts() {
    let app = setup();
    let customer = seed_customer(&app, "ada@example.com").await;
    let product = seed_product(&app, "Widget", 1999, 10).await;

    request(
        &app,
        "POST",
        "/orders",
        Some(json!({
            "customer_id": customer["id"],
            "items": [{ "product_id": product["id"], "quantity": 1 }]
        })),
    )
    .await;

    let customer_id = customer["id"].as_str().unwrap();
    let (status, _) = request(&app, "DELETE", &format!("/customers/{customer_id}"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let product_id = product["id"].as_str().unwrap();
    let (status, _) = request(&app, "DELETE", &format!("/products/{product_id}"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_unknown_order_paths_are_not_found() {
    let app = setup();
    let missing = "11111111-1111-1111-1111-111111111111";

    let (status, _) = request(&app, "GET", &format!("/orders/{missing}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = request(
        &app,
        "PUT",
        &format!("/orders/{missing}/status"),
        Some(json!({ "status": "SHIPPED" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = request(&app, "DELETE", &format!("/orders/{missing}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_metrics_endpoint_renders() {
    let app = setup();

    let (status, _) = request(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
