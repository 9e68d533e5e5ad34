//! Type definitions shared by the route layer
//!
//! - `response` - Message and health-check response bodies

pub mod response;

pub use response::{HealthResponse, MessageResponse};
