//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod contact;
pub mod user;

pub use contact::{ContactRecord, ContactRepository, CreateContact};
pub use user::{UserRecord, UserRepository};
