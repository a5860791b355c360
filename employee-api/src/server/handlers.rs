//! Request handlers for the employee routes.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{Method, Uri};
use axum::{BoxError, Json};
use serde::Serialize;
use tracing::{info, instrument};

use employee_shared::Employee;

use super::{ApiError, AppState};

/// Literal body returned by a delete, whether or not anything matched.
pub const DELETE_SUCCESS: &str = "Success";

/// Response body for the health check.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub store: &'static str,
}

/// Indexes the posted employee and returns the identifier it was stored under.
#[instrument(skip(state, payload))]
pub async fn create_employee(
    State(state): State<AppState>,
    payload: Result<Json<Employee>, JsonRejection>,
) -> Result<Json<String>, ApiError> {
    let Json(employee) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let id = state.store.index_employee(&employee).await?;

    info!(employee_id = %id, "Employee indexed");
    Ok(Json(id))
}

/// Lists every employee. An empty store yields an empty array.
#[instrument(skip(state))]
pub async fn list_employees(
    State(state): State<AppState>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    let employees = state.store.list_employees().await?;
    Ok(Json(employees))
}

/// Returns the employee with the given identifier.
#[instrument(skip(state))]
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Employee>, ApiError> {
    state
        .store
        .find_employee(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(id))
}

/// Deletes every document with the given identifier.
#[instrument(skip(state))]
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<&'static str>, ApiError> {
    let deleted = state.store.delete_employee(&id).await?;

    info!(employee_id = %id, deleted, "Employee deleted");
    Ok(Json(DELETE_SUCCESS))
}

/// Reports whether the backing cluster is usable.
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    match state.store.health_check().await {
        Ok(true) => Ok(Json(HealthResponse {
            status: "ok",
            store: "healthy",
        })),
        Ok(false) => Err(ApiError::unavailable("store cluster is unhealthy")),
        Err(e) => Err(ApiError::unavailable(e.to_string())),
    }
}

/// Fallback for paths no route matches.
pub async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::RouteNotFound(uri.path().to_string())
}

/// Fallback for a known path requested with an unsupported method.
pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::MethodNotAllowed(format!("{} {}", method, uri.path()))
}

/// Converts errors raised by the middleware stack into JSON responses.
pub async fn middleware_error(err: BoxError) -> ApiError {
    if err.is::<tower::timeout::error::Elapsed>() {
        ApiError::Timeout
    } else {
        ApiError::Internal(err.to_string())
    }
}
