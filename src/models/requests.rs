use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::Role;

/// Request to recompute matches for one profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TriggerMatchingRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "profile_id", rename = "profileId")]
    pub profile_id: String,
    pub role: Role,
}

/// Path parameters identifying an anchor profile
#[derive(Debug, Clone, Deserialize)]
pub struct ProfilePath {
    pub role: Role,
    pub profile_id: String,
}

/// Path parameters identifying a stored pair
#[derive(Debug, Clone, Deserialize)]
pub struct PairPath {
    pub investor_id: String,
    pub startup_id: String,
}
