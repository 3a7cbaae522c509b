// HTTP surface tests for Capmatch

use actix_web::{http::StatusCode, test, web, App};
use capmatch::models::{CompletenessResponse, DeleteMatchResponse, DevelopmentStage, Investor, MatchListResponse, Startup};
use capmatch::routes::{self, matches::AppState};
use capmatch::services::{MatchCache, MatchRepository, MemoryStore, ProfileStore};
use capmatch::MatchOrchestrator;
use serde_json::json;
use std::sync::Arc;

fn create_state() -> AppState {
    let store: Arc<dyn ProfileStore> = Arc::new(MemoryStore::with_profiles(
        vec![
            Startup {
                id: "s1".to_string(),
                industry: Some("Fintech".to_string()),
                development_stage: Some(DevelopmentStage::Mvp),
                city: Some("Makati".to_string()),
                keywords: vec!["AI".to_string(), "Lending".to_string()],
            },
            Startup {
                id: "s2".to_string(),
                industry: Some("Fintech".to_string()),
                development_stage: Some(DevelopmentStage::Growth),
                city: None,
                keywords: vec![],
            },
        ],
        vec![Investor {
            id: "i1".to_string(),
            preferred_industries: vec!["Fintech".to_string()],
            excluded_industries: vec![],
            preferred_funding_stages: vec!["Seed".to_string()],
            geographic_focus: vec!["Makati".to_string()],
            value_proposition: vec!["Lending".to_string()],
            involvement_level: Some("Advisor".to_string()),
            typical_check_size: None,
        }],
    ));

    let repository = MatchRepository::new(store.clone(), Arc::new(MatchCache::new(100, 60)));
    let orchestrator = Arc::new(MatchOrchestrator::new(store.clone(), repository.clone()));

    AppState {
        store,
        repository,
        orchestrator,
    }
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(routes::configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_health_reports_healthy() {
    let app = app!(create_state());

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_trigger_then_read_stored_matches() {
    let app = app!(create_state());

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/trigger")
        .set_json(json!({ "profileId": "i1", "role": "Investor" }))
        .to_request();
    let triggered: MatchListResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(triggered.total_matches, 2);
    assert_eq!(triggered.matches[0].startup_id(), "s1");
    assert_eq!(triggered.matches[0].match_percentage(), 80);

    let req = test::TestRequest::get().uri("/api/v1/matches/Startup/s1").to_request();
    let stored: MatchListResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(stored.total_matches, 1);
    assert_eq!(stored.matches[0].investor_id(), "i1");
}

#[actix_web::test]
async fn test_trigger_unknown_profile_is_404() {
    let app = app!(create_state());

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/trigger")
        .set_json(json!({ "profileId": "nobody", "role": "Startup" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_trigger_rejects_empty_id_and_unknown_role() {
    let app = app!(create_state());

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/trigger")
        .set_json(json!({ "profileId": "", "role": "Startup" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/trigger")
        .set_json(json!({ "profileId": "s1", "role": "Mentor" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_unknown_role_in_path_is_400() {
    let app = app!(create_state());

    let req = test::TestRequest::get().uri("/api/v1/matches/Mentor/x").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_path");

    let req = test::TestRequest::get()
        .uri("/api/v1/profiles/Mentor/x/completeness")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_malformed_trigger_body_is_json_400() {
    let app = app!(create_state());

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/trigger")
        .set_json(json!({ "profileId": "s1", "role": "Mentor" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_json");
}

#[actix_web::test]
async fn test_delete_pair() {
    let app = app!(create_state());

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/trigger")
        .set_json(json!({ "profileId": "s1", "role": "Startup" }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::delete().uri("/api/v1/pairs/i1/s1").to_request();
    let resp: DeleteMatchResponse = test::call_and_read_body_json(&app, req).await;
    assert!(resp.deleted);

    let req = test::TestRequest::get().uri("/api/v1/matches/Investor/i1").to_request();
    let stored: MatchListResponse = test::call_and_read_body_json(&app, req).await;
    assert!(stored.matches.is_empty());
}

#[actix_web::test]
async fn test_completeness() {
    let app = app!(create_state());

    let req = test::TestRequest::get()
        .uri("/api/v1/profiles/Startup/s1/completeness")
        .to_request();
    let resp: CompletenessResponse = test::call_and_read_body_json(&app, req).await;
    assert!(resp.complete);

    let req = test::TestRequest::get()
        .uri("/api/v1/profiles/Startup/s2/completeness")
        .to_request();
    let resp: CompletenessResponse = test::call_and_read_body_json(&app, req).await;
    assert!(!resp.complete);

    let req = test::TestRequest::get()
        .uri("/api/v1/profiles/Investor/ghost/completeness")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}
