//! OpenSearch employee store implementation.
//!
//! This module provides the concrete implementation of `EmployeeStore`
//! using the OpenSearch Rust client.

use std::future::Future;

use async_trait::async_trait;
use opensearch::{
    cluster::ClusterHealthParts,
    http::{
        response::Response,
        transport::{SingleNodeConnectionPool, TransportBuilder},
    },
    indices::{IndicesCreateParts, IndicesExistsParts},
    params::Refresh,
    DeleteByQueryParts, IndexParts, OpenSearch, SearchParts,
};
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use crate::config::StoreConfig;
use crate::errors::StoreError;
use crate::interfaces::EmployeeStore;
use crate::opensearch::index_config::get_index_settings;
use crate::opensearch::queries::{build_delete_by_id_query, build_id_query, build_match_all_query};
use crate::opensearch::response::{
    is_cluster_healthy, is_index_already_exists, is_index_not_found, is_retryable_status,
    parse_deleted_count, parse_hits, parse_indexed_id,
};
use employee_shared::Employee;

/// OpenSearch-backed employee store.
///
/// Connects to a single node without sniffing. Transient failures are retried
/// according to the `StoreConfig`.
///
/// # Example
///
/// ```ignore
/// let store = OpenSearchEmployeeStore::new("http://localhost:9200", StoreConfig::default())?;
/// store.ensure_index_exists().await?;
///
/// let id = store.index_employee(&Employee::with_id("e-1").first_name("Ada")).await?;
/// let found = store.find_employee(&id).await?;
/// ```
pub struct OpenSearchEmployeeStore {
    client: OpenSearch,
    config: StoreConfig,
}

impl OpenSearchEmployeeStore {
    /// Create a new store connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    /// * `config` - Index name, retry and listing settings
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchEmployeeStore)` - A new store instance
    /// * `Err(StoreError)` - If the URL is invalid or transport setup fails
    pub fn new(url: &str, config: StoreConfig) -> Result<Self, StoreError> {
        let parsed_url = Url::parse(url).map_err(|e| StoreError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| StoreError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %url,
            index = %config.index_name,
            max_retries = config.max_retries,
            "Created OpenSearch employee store"
        );

        Ok(Self { client, config })
    }

    fn write_refresh(&self) -> Refresh {
        if self.config.refresh_on_write {
            Refresh::WaitFor
        } else {
            Refresh::False
        }
    }

    /// Send a request, retrying transport errors and retryable statuses.
    ///
    /// After `max_retries` retries the last response or error is returned as is.
    async fn send_with_retry<F, Fut>(
        &self,
        operation: &'static str,
        send: F,
    ) -> Result<Response, opensearch::Error>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<Response, opensearch::Error>>,
    {
        let mut attempt = 0;
        loop {
            match send().await {
                Ok(response)
                    if attempt < self.config.max_retries
                        && is_retryable_status(response.status_code().as_u16()) =>
                {
                    warn!(
                        operation,
                        attempt = attempt + 1,
                        status = %response.status_code(),
                        "Retrying store request"
                    );
                }
                Ok(response) => return Ok(response),
                Err(e) if attempt < self.config.max_retries => {
                    warn!(operation, attempt = attempt + 1, error = %e, "Retrying store request");
                }
                Err(e) => return Err(e),
            }
            attempt += 1;
            tokio::time::sleep(self.config.backoff_for(attempt)).await;
        }
    }

    /// Run a search and return its body, or `None` if the index does not exist.
    async fn search_body(&self, body: Value) -> Result<Option<Value>, StoreError> {
        let indices = [self.config.index_name.as_str()];

        let response = self
            .send_with_retry("search", || {
                self.client
                    .search(SearchParts::Index(&indices))
                    .body(body.clone())
                    .send()
            })
            .await
            .map_err(|e| StoreError::query(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let (error_text, error_body) = failure_body(response).await;
            if is_index_not_found(&error_body) {
                debug!(index = %self.config.index_name, "Index does not exist yet");
                return Ok(None);
            }
            error!(status = %status, body = %error_text, "Search request failed");
            return Err(StoreError::query(format!(
                "Search failed with status {}: {}",
                status, error_text
            )));
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| StoreError::parse(e.to_string()))?;

        Ok(Some(response_body))
    }
}

/// Read a failed response as text, along with its JSON form if it has one.
///
/// The JSON form is `Value::Null` when the body is not JSON.
async fn failure_body(response: Response) -> (String, Value) {
    let text = response.text().await.unwrap_or_default();
    let json = serde_json::from_str(&text).unwrap_or(Value::Null);
    (text, json)
}

#[async_trait]
impl EmployeeStore for OpenSearchEmployeeStore {
    #[instrument(skip(self, employee), fields(employee_id = employee.document_id().unwrap_or("<auto>")))]
    async fn index_employee(&self, employee: &Employee) -> Result<String, StoreError> {
        let index = self.config.index_name.as_str();
        let body = serde_json::to_value(employee)?;

        let response = match employee.document_id() {
            Some(id) => {
                self.send_with_retry("index", || {
                    self.client
                        .index(IndexParts::IndexId(index, id))
                        .refresh(self.write_refresh())
                        .body(body.clone())
                        .send()
                })
                .await
            }
            // Sent once: every attempt would store a new document under a
            // fresh engine-assigned id
            None => {
                self.client
                    .index(IndexParts::Index(index))
                    .refresh(self.write_refresh())
                    .body(body)
                    .send()
                    .await
            }
        }
        .map_err(|e| StoreError::index(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Index request failed");
            return Err(StoreError::index(format!(
                "Index failed with status {}: {}",
                status, error_body
            )));
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| StoreError::parse(e.to_string()))?;
        let doc_id = parse_indexed_id(&response_body)?;

        debug!(doc_id = %doc_id, "Employee indexed");
        Ok(doc_id)
    }

    #[instrument(skip(self))]
    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        let Some(body) = self
            .search_body(build_match_all_query(self.config.list_limit))
            .await?
        else {
            return Ok(Vec::new());
        };

        let employees = parse_hits(&body)?;
        debug!(count = employees.len(), "Listed employees");
        Ok(employees)
    }

    #[instrument(skip(self))]
    async fn find_employee(&self, id: &str) -> Result<Option<Employee>, StoreError> {
        let Some(body) = self.search_body(build_id_query(id)).await? else {
            return Ok(None);
        };

        Ok(parse_hits(&body)?.into_iter().next())
    }

    #[instrument(skip(self))]
    async fn delete_employee(&self, id: &str) -> Result<u64, StoreError> {
        let indices = [self.config.index_name.as_str()];
        let body = build_delete_by_id_query(id);

        let response = self
            .send_with_retry("delete_by_query", || {
                self.client
                    .delete_by_query(DeleteByQueryParts::Index(&indices))
                    .refresh(self.config.refresh_on_write)
                    .body(body.clone())
                    .send()
            })
            .await
            .map_err(|e| StoreError::delete(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let (error_text, error_body) = failure_body(response).await;
            // Nothing to delete from an index that was never created
            if is_index_not_found(&error_body) {
                return Ok(0);
            }
            error!(status = %status, body = %error_text, "Delete request failed");
            return Err(StoreError::delete(format!(
                "Delete failed with status {}: {}",
                status, error_text
            )));
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| StoreError::parse(e.to_string()))?;

        let deleted = parse_deleted_count(&response_body);
        debug!(deleted, "Delete by query completed");
        Ok(deleted)
    }

    async fn ensure_index_exists(&self) -> Result<(), StoreError> {
        let index = self.config.index_name.as_str();
        let indices = [index];
        let indices_client = self.client.indices();

        let exists = self
            .send_with_retry("indices.exists", || {
                indices_client
                    .exists(IndicesExistsParts::Index(&indices))
                    .send()
            })
            .await
            .map_err(|e| StoreError::connection(e.to_string()))?;

        if exists.status_code().is_success() {
            debug!(index = %index, "Index already exists");
            return Ok(());
        }

        let response = self
            .send_with_retry("indices.create", || {
                indices_client
                    .create(IndicesCreateParts::Index(index))
                    .body(get_index_settings())
                    .send()
            })
            .await
            .map_err(|e| StoreError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if status.is_success() {
            info!(index = %index, "Created employee index");
            return Ok(());
        }

        let (error_text, error_body) = failure_body(response).await;
        // Another instance created it first
        if is_index_already_exists(&error_body) {
            return Ok(());
        }

        error!(status = %status, body = %error_text, "Index creation failed");
        Err(StoreError::index_creation(format!(
            "Index creation failed with status {}: {}",
            status, error_text
        )))
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| StoreError::connection(e.to_string()))?;

        if !response.status_code().is_success() {
            warn!(status = %response.status_code(), "Cluster health request failed");
            return Ok(false);
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| StoreError::parse(e.to_string()))?;

        Ok(is_cluster_healthy(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_url() {
        let result = OpenSearchEmployeeStore::new("not a url", StoreConfig::default());
        assert!(matches!(result, Err(StoreError::ConnectionError(_))));
    }

    #[test]
    fn test_new_accepts_valid_url() {
        let result = OpenSearchEmployeeStore::new("http://localhost:9200", StoreConfig::default());
        assert!(result.is_ok());
    }

    #[test]
    fn test_write_refresh() {
        let store =
            OpenSearchEmployeeStore::new("http://localhost:9200", StoreConfig::default()).unwrap();
        assert!(matches!(store.write_refresh(), Refresh::WaitFor));

        let config = StoreConfig {
            refresh_on_write: false,
            ..Default::default()
        };
        let store = OpenSearchEmployeeStore::new("http://localhost:9200", config).unwrap();
        assert!(matches!(store.write_refresh(), Refresh::False));
    }

    #[tokio::test]
    async fn test_unreachable_cluster_is_an_error() {
        // Port 9 (discard) on localhost refuses connections.
        let config = StoreConfig::default().with_max_retries(0);
        let store = OpenSearchEmployeeStore::new("http://127.0.0.1:9", config).unwrap();

        let result = store.list_employees().await;

        assert!(matches!(result, Err(StoreError::QueryError(_))));
    }
}
