//! # RealEstate Core
//!
//! Core authentication domain for the RealEstate backend: user accounts,
//! access and refresh tokens, the credential store contract, and the
//! login / registration / refresh / revoke lifecycle.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
