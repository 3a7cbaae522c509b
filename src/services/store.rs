use crate::models::{Investor, MatchResult, Role, Startup};
use thiserror::Error;

/// Errors that can occur when reading from or writing to the profile store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// Profile store port consumed by the match engine
///
/// Reads profiles, and replaces the match rows computed for them. Adapters
/// must make [`ProfileStore::replace_matches`] all-or-nothing.
#[mockall::automock]
#[async_trait::async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch a startup by id
    async fn get_startup(&self, id: &str) -> Result<Option<Startup>, StoreError>;

    /// Fetch an investor by id
    async fn get_investor(&self, id: &str) -> Result<Option<Investor>, StoreError>;

    /// Bulk read of startups carrying both an industry and a development stage
    async fn candidate_startups(&self) -> Result<Vec<Startup>, StoreError>;

    /// Bulk read of investors with at least one industry, stage or geographic preference
    async fn candidate_investors(&self) -> Result<Vec<Investor>, StoreError>;

    /// Remove the stored row for one pair, returning whether it existed
    async fn delete_match(&self, investor_id: &str, startup_id: &str) -> Result<bool, StoreError>;

    /// Insert rows, overwriting any existing row for the same pair
    async fn insert_matches(&self, matches: &[MatchResult]) -> Result<(), StoreError>;

    /// Delete then insert the rows for every pair in `matches` as one atomic unit
    async fn replace_matches(&self, matches: &[MatchResult]) -> Result<(), StoreError>;

    /// Latest persisted matches involving a profile, best first
    async fn stored_matches(&self, role: Role, id: &str) -> Result<Vec<MatchResult>, StoreError>;

    /// Connectivity check
    async fn health_check(&self) -> Result<bool, StoreError>;
}
