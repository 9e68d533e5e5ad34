//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the RealEstate
//! application, following Clean Architecture principles. It provides the
//! concrete credential stores behind `re_core::repositories::UserRepository`.
//!
//! ## Architecture
//!
//! - **Database**: MySQL implementation using SQLx, pool management and
//!   embedded migrations
//! - **Memory**: process-local store for development and tests
//! - **Store selection**: [`database::CredentialStore`] picks one of the two
//!   from configuration

// Re-export core types for convenience
pub use re_core::errors::*;

/// Database module - credential store implementations
pub mod database;

pub use database::{CredentialStore, DatabasePool, InMemoryUserRepository, MySqlUserRepository};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
