use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub rules_loaded: usize,
    pub rows_skipped: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
