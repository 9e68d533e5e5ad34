//! Shared utilities and common types for the RealEstate server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Error types and response structures
//! - Input validation helpers (email, password strength, log masking)

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    LockoutConfig, LogFormat, LoggingConfig, ServerConfig,
};
pub use errors::{error_codes, ApiResult, ErrorResponse};
pub use types::{HealthResponse, MessageResponse};
pub use utils::validation;
