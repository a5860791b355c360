//! Employee store trait definition.
//!
//! This module defines the abstract interface for storing and retrieving
//! employee documents, allowing for different backend implementations
//! (OpenSearch, Elasticsearch, in-memory fakes for tests).

use async_trait::async_trait;

use crate::errors::StoreError;
use employee_shared::Employee;

/// Abstract interface for employee document storage.
///
/// The HTTP layer holds one `Arc<dyn EmployeeStore>` shared by every request.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Error Handling
///
/// All methods return `Result<T, StoreError>`. Absence is not an error:
/// an empty index lists as an empty vector and a missing record is `None`.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Index an employee document.
    ///
    /// The document is keyed by its identifier when one is supplied, replacing
    /// any existing document with that identifier. Otherwise the store assigns
    /// one.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The identifier the document was stored under
    /// * `Err(StoreError)` - If indexing fails
    async fn index_employee(&self, employee: &Employee) -> Result<String, StoreError>;

    /// Return every employee document, up to the configured list limit.
    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError>;

    /// Look up one employee by identifier.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Employee))` - The first matching document
    /// * `Ok(None)` - If no document has that identifier
    /// * `Err(StoreError)` - If the query fails
    async fn find_employee(&self, id: &str) -> Result<Option<Employee>, StoreError>;

    /// Delete every document whose identifier matches `id`.
    ///
    /// Returns the number of documents removed, which is zero when nothing
    /// matched.
    async fn delete_employee(&self, id: &str) -> Result<u64, StoreError>;

    /// Ensure the index exists with the employee mappings.
    ///
    /// This should be called during application startup.
    async fn ensure_index_exists(&self) -> Result<(), StoreError>;

    /// Check if the backing engine is healthy and reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the engine is healthy
    /// * `Ok(false)` - If the engine is reachable but unhealthy
    /// * `Err(StoreError)` - If the health check fails to execute
    async fn health_check(&self) -> Result<bool, StoreError>;
}
