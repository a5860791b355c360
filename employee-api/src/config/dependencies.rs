//! Dependency initialization and wiring for the employee API.

use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Settings;
use crate::server::AppState;
use crate::ServiceError;
use employee_repository::{EmployeeStore, OpenSearchEmployeeStore};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// Shared state handed to the router.
    pub state: AppState,
}

impl Dependencies {
    /// Initialize all dependencies from the given settings.
    ///
    /// Connects the OpenSearch store, optionally verifies cluster health and
    /// creates the employee index if it does not exist yet.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(ServiceError)` - If initialization fails
    pub async fn new(settings: &Settings) -> Result<Self, ServiceError> {
        info!(
            store_url = %settings.store_url,
            index = %settings.store.index_name,
            "Initializing dependencies"
        );

        let store = OpenSearchEmployeeStore::new(&settings.store_url, settings.store.clone())
            .map_err(|e| ServiceError::config(format!("Failed to create OpenSearch client: {}", e)))?;

        if settings.healthcheck_on_start {
            let healthy = store.health_check().await.map_err(|e| {
                ServiceError::config(format!("OpenSearch health check failed: {}", e))
            })?;

            if !healthy {
                return Err(ServiceError::config("OpenSearch cluster is unhealthy"));
            }

            info!("OpenSearch connection verified");
        }

        if settings.ensure_index {
            // Writes auto-create the index, so a failure here is not fatal
            if let Err(e) = store.ensure_index_exists().await {
                warn!(error = %e, "Could not ensure employee index exists");
            }
        }

        let state = AppState::new(Arc::new(store));

        Ok(Self { state })
    }
}
