//! # Employee Repository
//!
//! This crate provides the store interface the HTTP service is built against,
//! the error type every store operation returns, and a concrete implementation
//! backed by OpenSearch.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;

pub use config::StoreConfig;
pub use errors::StoreError;
pub use interfaces::EmployeeStore;
pub use opensearch::OpenSearchEmployeeStore;
