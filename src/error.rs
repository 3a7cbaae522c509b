use crate::models::Role;
use crate::services::StoreError;
use thiserror::Error;

/// Errors surfaced by a matching run
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("{role} not found: {id}")]
    NotFound { role: Role, id: String },

    #[error("Storage failure: {0}")]
    StorageFailure(#[from] StoreError),
}

impl MatchError {
    pub fn not_found(role: Role, id: impl Into<String>) -> Self {
        MatchError::NotFound { role, id: id.into() }
    }
}
