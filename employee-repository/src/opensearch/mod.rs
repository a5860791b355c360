//! OpenSearch implementation of the employee store.
//!
//! This module provides a concrete implementation of `EmployeeStore`
//! using OpenSearch as the backend.

mod client;
mod index_config;
mod queries;
mod response;

pub use client::OpenSearchEmployeeStore;
pub use index_config::get_index_settings;
