//! HTTP server for the employee API.

pub mod error;
pub mod handlers;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::ServiceError;
use employee_repository::EmployeeStore;

pub use error::ApiError;
pub use routes::build_router;

/// Shared application state injected into all handlers via axum's State extractor.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EmployeeStore>,
}

impl AppState {
    /// Create state around the given store.
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        Self { store }
    }
}

/// Bind `addr` and serve `router` until Ctrl-C or SIGTERM.
pub async fn serve(addr: SocketAddr, router: Router) -> Result<(), ServiceError> {
    let listener = TcpListener::bind(addr).await?;

    info!(%addr, "Employee API listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Employee API stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    ctrl_c.await;

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    };

    info!("Shutdown signal received");
}
