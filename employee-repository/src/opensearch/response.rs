//! Parsing of OpenSearch response bodies.

use serde_json::Value;
use tracing::warn;

use crate::errors::StoreError;
use employee_shared::Employee;

const INDEX_NOT_FOUND: &str = "index_not_found_exception";
const INDEX_ALREADY_EXISTS: &str = "resource_already_exists_exception";

/// Whether a failed response should be retried.
///
/// Server errors and throttling are transient; any other 4xx is the caller's fault.
pub fn is_retryable_status(status: u16) -> bool {
    status == 429 || (500..600).contains(&status)
}

/// The `error.type` field of an error body, if present.
fn error_type(body: &Value) -> Option<&str> {
    body.get("error")
        .and_then(|e| e.get("type"))
        .and_then(|t| t.as_str())
}

/// Whether an error body reports that the index does not exist.
pub fn is_index_not_found(body: &Value) -> bool {
    error_type(body) == Some(INDEX_NOT_FOUND)
}

/// Whether an error body reports that the index already exists.
pub fn is_index_already_exists(body: &Value) -> bool {
    error_type(body) == Some(INDEX_ALREADY_EXISTS)
}

/// Parse a single search hit into an employee.
///
/// When the stored source carries no `id`, the hit's `_id` is used so callers
/// can always address the record. Returns `None` for hits without `_source`.
pub fn parse_hit(hit: &Value) -> Option<Employee> {
    let source = hit.get("_source")?;

    let mut employee: Employee = match serde_json::from_value(source.clone()) {
        Ok(employee) => employee,
        Err(e) => {
            warn!(error = %e, "Skipping hit with unparseable source");
            return None;
        }
    };

    if employee.document_id().is_none() {
        employee.id = hit.get("_id").and_then(|id| id.as_str()).map(str::to_string);
    }

    Some(employee)
}

/// Parse the hits of a search response.
pub fn parse_hits(body: &Value) -> Result<Vec<Employee>, StoreError> {
    let hits = body
        .get("hits")
        .and_then(|h| h.get("hits"))
        .and_then(|h| h.as_array())
        .ok_or_else(|| StoreError::parse("search response has no hits array"))?;

    Ok(hits.iter().filter_map(parse_hit).collect())
}

/// Extract the `_id` assigned by an index response.
pub fn parse_indexed_id(body: &Value) -> Result<String, StoreError> {
    body.get("_id")
        .and_then(|id| id.as_str())
        .map(str::to_string)
        .ok_or_else(|| StoreError::parse("index response has no _id"))
}

/// Extract the number of removed documents from a delete-by-query response.
pub fn parse_deleted_count(body: &Value) -> u64 {
    body.get("deleted").and_then(|d| d.as_u64()).unwrap_or(0)
}

/// Whether a cluster health response reports a usable cluster.
pub fn is_cluster_healthy(body: &Value) -> bool {
    matches!(
        body.get("status").and_then(|s| s.as_str()),
        Some("green") | Some("yellow")
    )
}
