//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers.
//! They depend on storage only through [`crate::repository::Repository`].

pub mod account_service;
pub mod health_service;
pub mod operation_type_registry;
pub mod transaction_service;
