use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tokio::sync::Mutex;
use tower::ServiceExt;

use employee_api::{build_router, AppState};
use employee_repository::{EmployeeStore, StoreError};
use employee_shared::Employee;

/// Store keeping documents in memory, keyed like the OpenSearch `_id`.
#[derive(Default)]
pub struct InMemoryStore {
    documents: Mutex<BTreeMap<String, Employee>>,
    next_id: AtomicUsize,
}

#[async_trait]
impl EmployeeStore for InMemoryStore {
    async fn index_employee(&self, employee: &Employee) -> Result<String, StoreError> {
        let id = match employee.document_id() {
            Some(id) => id.to_string(),
            None => format!("auto-{}", self.next_id.fetch_add(1, Ordering::SeqCst)),
        };
        let mut stored = employee.clone();
        stored.id = Some(id.clone());
        self.documents.lock().await.insert(id.clone(), stored);
        Ok(id)
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        Ok(self.documents.lock().await.values().cloned().collect())
    }

    async fn find_employee(&self, id: &str) -> Result<Option<Employee>, StoreError> {
        Ok(self.documents.lock().await.get(id).cloned())
    }

    async fn delete_employee(&self, id: &str) -> Result<u64, StoreError> {
        Ok(self.documents.lock().await.remove(id).map_or(0, |_| 1))
    }

    async fn ensure_index_exists(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

/// Store whose every call fails, as when the cluster is unreachable.
pub struct FailingStore;

#[async_trait]
impl EmployeeStore for FailingStore {
    async fn index_employee(&self, _employee: &Employee) -> Result<String, StoreError> {
        Err(StoreError::index("Mock failure"))
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        Err(StoreError::query("Mock failure"))
    }

    async fn find_employee(&self, _id: &str) -> Result<Option<Employee>, StoreError> {
        Err(StoreError::query("Mock failure"))
    }

    async fn delete_employee(&self, _id: &str) -> Result<u64, StoreError> {
        Err(StoreError::delete("Mock failure"))
    }

    async fn ensure_index_exists(&self) -> Result<(), StoreError> {
        Err(StoreError::index_creation("Mock failure"))
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Err(StoreError::connection("Mock failure"))
    }
}

/// Store that answers only after a fixed delay.
pub struct SlowStore {
    pub delay: Duration,
}

#[async_trait]
impl EmployeeStore for SlowStore {
    async fn index_employee(&self, employee: &Employee) -> Result<String, StoreError> {
        tokio::time::sleep(self.delay).await;
        Ok(employee.document_id().unwrap_or("slow").to_string())
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        tokio::time::sleep(self.delay).await;
        Ok(Vec::new())
    }

    async fn find_employee(&self, _id: &str) -> Result<Option<Employee>, StoreError> {
        tokio::time::sleep(self.delay).await;
        Ok(None)
    }

    async fn delete_employee(&self, _id: &str) -> Result<u64, StoreError> {
        tokio::time::sleep(self.delay).await;
        Ok(0)
    }

    async fn ensure_index_exists(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        tokio::time::sleep(self.delay).await;
        Ok(true)
    }
}

pub fn router_with(store: Arc<dyn EmployeeStore>) -> Router {
    router_with_timeout(store, Duration::from_secs(5))
}

pub fn router_with_timeout(store: Arc<dyn EmployeeStore>, timeout: Duration) -> Router {
    build_router(AppState::new(store), timeout)
}

pub fn memory_router() -> Router {
    router_with(Arc::new(InMemoryStore::default()))
}

/// Send one request through the router and decode the JSON response body.
pub async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}
