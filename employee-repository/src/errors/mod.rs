//! Error types for the employee repository.

mod store_error;

pub use store_error::StoreError;
