use crate::core::filters::{is_candidate_investor, is_candidate_startup};
use crate::models::{Investor, Startup};
use crate::services::{ProfileStore, StoreError};
use std::sync::Arc;

/// Chooses the opposite-side population to score an anchor against
///
/// The store narrows the read; the predicates are re-applied here so every
/// adapter yields the same population.
#[derive(Clone)]
pub struct CandidateSelector {
    store: Arc<dyn ProfileStore>,
}

impl CandidateSelector {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    /// Investors to score against a startup anchor
    pub async fn investors(&self) -> Result<Vec<Investor>, StoreError> {
        let investors = self.store.candidate_investors().await?;
        Ok(investors.into_iter().filter(is_candidate_investor).collect())
    }

    /// Startups to score against an investor anchor
    pub async fn startups(&self) -> Result<Vec<Startup>, StoreError> {
        let startups = self.store.candidate_startups().await?;
        Ok(startups.into_iter().filter(is_candidate_startup).collect())
    }
}
