//! API response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Plain `{ "message": ... }` body for operations without a payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,

    /// Service version
    pub version: String,

    /// Whether the credential store answered
    pub store: bool,

    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn new(version: impl Into<String>, store_healthy: bool) -> Self {
        Self {
            status: if store_healthy { "healthy" } else { "degraded" }.to_string(),
            version: version.into(),
            store: store_healthy,
            timestamp: Utc::now(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.store
    }
}
