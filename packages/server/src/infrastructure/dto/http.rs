//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Response of `GET /`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthDto {
    /// Whole seconds since the server started, as a string.
    pub uptime: String,
    pub version: String,
}
