// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod scoring;
pub mod selector;

pub use filters::{is_candidate_investor, is_candidate_startup, is_complete, is_investor_complete, is_startup_complete};
pub use matcher::{rank_matches, MatchOrchestrator, MATCH_THRESHOLD};
pub use scoring::{calculate_match_score, MAX_POSSIBLE_SCORE};
pub use selector::CandidateSelector;
