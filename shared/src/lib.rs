//! Contact Keeper Shared Library
//!
//! This crate contains the request/response types and input validation
//! helpers shared between the backend and its integration tests.

pub mod errors;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use types::*;
