use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{is_complete, MatchOrchestrator};
use crate::error::MatchError;
use crate::models::{
    CompletenessResponse, DeleteMatchResponse, ErrorResponse, HealthResponse, MatchListResponse,
    PairPath, Profile, ProfilePath, Role, TriggerMatchingRequest,
};
use crate::services::{MatchRepository, ProfileStore, StoreError};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProfileStore>,
    pub repository: MatchRepository,
    pub orchestrator: Arc<MatchOrchestrator>,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/trigger", web::post().to(trigger_matching))
        .route("/matches/{role}/{profile_id}", web::get().to(stored_matches))
        .route("/pairs/{investor_id}/{startup_id}", web::delete().to(delete_match))
        .route("/profiles/{role}/{profile_id}/completeness", web::get().to(completeness));
}

fn error_response(err: &MatchError) -> HttpResponse {
    match err {
        MatchError::NotFound { .. } => HttpResponse::NotFound().json(ErrorResponse {
            error: "Profile not found".to_string(),
            message: err.to_string(),
            status_code: 404,
        }),
        MatchError::StorageFailure(e) => {
            tracing::error!("Profile store failure: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Storage failure".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

fn storage_error_response(err: StoreError) -> HttpResponse {
    error_response(&MatchError::StorageFailure(err))
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Trigger matching endpoint
///
/// POST /api/v1/matches/trigger
///
/// Request body:
/// ```json
/// {
///   "profileId": "string",
///   "role": "Startup|Investor"
/// }
/// ```
async fn trigger_matching(
    state: web::Data<AppState>,
    req: web::Json<TriggerMatchingRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for trigger request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match state.orchestrator.trigger_matching(&req.profile_id, req.role).await {
        Ok(matches) => HttpResponse::Ok().json(MatchListResponse {
            profile_id: req.profile_id.clone(),
            role: req.role,
            total_matches: matches.len(),
            matches,
        }),
        Err(e) => error_response(&e),
    }
}

/// Stored matches endpoint
///
/// GET /api/v1/matches/{role}/{profileId}
///
/// Returns the last persisted match set involving the profile, best first.
async fn stored_matches(
    state: web::Data<AppState>,
    path: web::Path<ProfilePath>,
) -> impl Responder {
    let ProfilePath { role, profile_id } = path.into_inner();

    match state.repository.stored_for(role, &profile_id).await {
        Ok(matches) => {
            let matches = matches.as_ref().clone();
            HttpResponse::Ok().json(MatchListResponse {
                profile_id,
                role,
                total_matches: matches.len(),
                matches,
            })
        }
        Err(e) => storage_error_response(e),
    }
}

/// Delete a stored pair
///
/// DELETE /api/v1/pairs/{investorId}/{startupId}
async fn delete_match(
    state: web::Data<AppState>,
    path: web::Path<PairPath>,
) -> impl Responder {
    let PairPath { investor_id, startup_id } = path.into_inner();

    match state.repository.delete(&investor_id, &startup_id).await {
        Ok(deleted) => {
            tracing::info!("Delete match {} -> {}: deleted={}", investor_id, startup_id, deleted);
            HttpResponse::Ok().json(DeleteMatchResponse { deleted })
        }
        Err(e) => storage_error_response(e),
    }
}

/// Completeness check endpoint
///
/// GET /api/v1/profiles/{role}/{profileId}/completeness
///
/// Tells onboarding callers whether a profile carries enough data to be
/// invited into matching.
async fn completeness(
    state: web::Data<AppState>,
    path: web::Path<ProfilePath>,
) -> impl Responder {
    let ProfilePath { role, profile_id } = path.into_inner();

    let profile = match role {
        Role::Startup => state.store.get_startup(&profile_id).await.map(|p| p.map(Profile::Startup)),
        Role::Investor => state.store.get_investor(&profile_id).await.map(|p| p.map(Profile::Investor)),
    };

    match profile {
        Ok(Some(profile)) => HttpResponse::Ok().json(CompletenessResponse {
            profile_id,
            role,
            complete: is_complete(&profile),
        }),
        Ok(None) => error_response(&MatchError::not_found(role, profile_id)),
        Err(e) => storage_error_response(e),
    }
}
