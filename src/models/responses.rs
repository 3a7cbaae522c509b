use serde::{Deserialize, Serialize};
use crate::models::domain::{MatchResult, Role};

/// Response for the trigger and stored-matches endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchListResponse {
    #[serde(rename = "profileId")]
    pub profile_id: String,
    pub role: Role,
    pub matches: Vec<MatchResult>,
    #[serde(rename = "totalMatches")]
    pub total_matches: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Completeness check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletenessResponse {
    #[serde(rename = "profileId")]
    pub profile_id: String,
    pub role: Role,
    pub complete: bool,
}

/// Pair deletion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteMatchResponse {
    pub deleted: bool,
}
