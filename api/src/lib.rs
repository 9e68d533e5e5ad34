//! # RealEstate API
//!
//! actix-web route layer over the core authentication service. The binary
//! in `main.rs` wires configuration, the credential store and tracing; the
//! library is what the integration tests drive.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;
