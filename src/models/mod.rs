// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{DevelopmentStage, Investor, MatchFactors, MatchResult, Profile, Role, Startup};
pub use requests::{PairPath, ProfilePath, TriggerMatchingRequest};
pub use responses::{CompletenessResponse, DeleteMatchResponse, ErrorResponse, HealthResponse, MatchListResponse};
