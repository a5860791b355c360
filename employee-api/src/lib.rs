//! # Employee API
//!
//! HTTP service exposing create, list, get and delete over employee records
//! held in OpenSearch.
//!
//! This crate provides the settings, dependency wiring and router for the
//! `employee-api` binary. The router is built against an injected
//! [`EmployeeStore`](employee_repository::EmployeeStore), so tests can run it
//! over any backend.

pub mod config;
pub mod server;

pub use config::{Dependencies, Settings};
pub use server::{build_router, AppState};

use thiserror::Error;

/// Errors that can occur while starting or running the service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Store error.
    #[error("Store error: {0}")]
    StoreError(#[from] employee_repository::StoreError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ServiceError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
