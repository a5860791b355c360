//! Interface definitions for the employee store.
//!
//! This module defines the abstract `EmployeeStore` trait that the HTTP layer
//! depends on, so the backend can be injected and swapped out in tests.

mod employee_store;

pub use employee_store::EmployeeStore;
