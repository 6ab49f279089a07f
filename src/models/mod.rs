//! Data models representing database entities.
//!
//! This module contains all data structures that map to database tables,
//! the filter objects used to query them, and the request/response bodies.

/// Account model and filter
pub mod account;
/// Operation types and their sign policy
pub mod operation_type;
/// Transaction model, validation and merge rules
pub mod transaction;
