//! Database module - credential store implementations
//!
//! This module provides:
//! - Connection pool management
//! - MySQL and in-memory `UserRepository` implementations
//! - Store selection from configuration
//! - Database migrations

pub mod connection;
pub mod memory;
pub mod mysql;
pub mod store;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use memory::InMemoryUserRepository;
pub use mysql::MySqlUserRepository;
pub use store::CredentialStore;
