//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - HS256 access token issuance and validation
//! - Opaque refresh token generation and digesting for storage
//! - Expiry inspection helpers

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::TokenService;
