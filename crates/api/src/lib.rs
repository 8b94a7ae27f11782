//! HTTP API server for the sales backend.
//!
//! Translates HTTP requests into domain service calls and domain results
//! and errors into status codes, with structured logging (tracing) and
//! Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use domain::{CustomerService, OrderService, ProductService};
use metrics_exporter_prometheus::PrometheusHandle;
use store::StorageGateway;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state accessible from all handlers.
pub struct AppState<G: StorageGateway> {
    pub customers: CustomerService<G>,
    pub products: ProductService<G>,
    pub orders: OrderService<G>,
}

/// Builds the application state over the given storage gateway.
pub fn create_state<G: StorageGateway + Clone>(store: G) -> Arc<AppState<G>> {
    Arc::new(AppState {
        customers: CustomerService::new(store.clone()),
        products: ProductService::new(store.clone()),
        orders: OrderService::new(store),
    })
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<G: StorageGateway + Clone + 'static>(
    state: Arc<AppState<G>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/orders", post(routes::orders::create::<G>))
        .route("/orders", get(routes::orders::list::<G>))
        .route("/orders/{id}", get(routes::orders::get::<G>))
        .route("/orders/{id}", axum::routing::delete(routes::orders::delete::<G>))
        .route("/orders/{id}/status", put(routes::orders::update_status::<G>))
        .route(
            "/orders/customer/{customer_id}",
            get(routes::orders::by_customer::<G>),
        )
        .route("/orders/status/{status}", get(routes::orders::by_status::<G>))
        .route("/customers", get(routes::customers::list::<G>))
        .route("/customers", post(routes::customers::create::<G>))
        .route("/customers/{id}", get(routes::customers::get::<G>))
        .route("/customers/{id}", put(routes::customers::update::<G>))
        .route(
            "/customers/{id}",
            axum::routing::delete(routes::customers::delete::<G>),
        )
        .route("/products", get(routes::products::list::<G>))
        .route("/products", post(routes::products::create::<G>))
        .route("/products/search", get(routes::products::search::<G>))
        .route("/products/in-stock", get(routes::products::in_stock::<G>))
        .route("/products/{id}", get(routes::products::get::<G>))
        .route("/products/{id}", put(routes::products::update::<G>))
        .route(
            "/products/{id}",
            axum::routing::delete(routes::products::delete::<G>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
