//! Response DTOs.

use serde::{Deserialize, Serialize};

use drivebox_entity::entry::FileEntry;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Body of a successful move response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovedEntriesResponse {
    /// The filtered, moved entries with their new parent and path.
    pub entries: Vec<FileEntry>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Running version.
    pub version: String,
}
