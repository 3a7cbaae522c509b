//! Capmatch - match-scoring and ranking engine for a startup/investor marketplace
//!
//! Given one startup or investor, this library scores it against the opposite
//! side of the marketplace, keeps and ranks the compatible pairs, and replaces
//! their stored match rows.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{calculate_match_score, MatchOrchestrator, MATCH_THRESHOLD};
pub use crate::error::MatchError;
pub use crate::models::{DevelopmentStage, Investor, MatchFactors, MatchResult, Role, Startup};
pub use crate::services::{MatchCache, MatchRepository, MemoryStore, PostgresStore, ProfileStore, StoreError};
