use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::http::HeaderName;
use axum::routing::{get, post};
use axum::Router;
use tower::timeout::TimeoutLayer;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::handlers;
use super::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Builds the axum router with all routes, middleware, and shared state.
///
/// Unknown paths, unsupported methods and timed out requests all answer with
/// the same JSON error body as the handlers.
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    let header_name = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .route("/employee", post(handlers::create_employee))
        .route("/employees", get(handlers::list_employees))
        .route(
            "/employee/{id}",
            get(handlers::get_employee).delete(handlers::delete_employee),
        )
        .route("/health", get(handlers::health))
        .fallback(handlers::route_not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(header_name.clone(), MakeRequestUuid))
                .layer(PropagateRequestIdLayer::new(header_name))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(HandleErrorLayer::new(handlers::middleware_error))
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .with_state(state)
}
