//! Integration tests for the checklist engine over the REST client.
//!
//! A mockito server stands in for the HomieHQ backend, so these tests cover
//! the coordinator, the reqwest adapter, and payload normalization together.

use std::sync::Arc;
use std::time::Duration;

use mockito::Matcher;

use homiehq_checklist::adapters::{
    ChecklistApiConfig, ReqwestChecklistApi, StaticAccessToken, StaticConfirmation,
};
use homiehq_checklist::application::{ChecklistCoordinator, ErrorKind, MutationOutcome};
use homiehq_checklist::domain::checklist::{ItemDraft, Season};
use homiehq_checklist::domain::foundation::{ChecklistItemId, PropertyId};

const SPRING_ITEMS: &str = r#"[
    {"id": 11, "task": "Inspect roof", "season": "Spring", "property_id": 5, "is_completed": false, "is_default": true},
    {"id": 12, "task": "Service AC", "season": "Spring", "property_id": 5, "is_completed": true, "completed_at": "2024-04-02T09:30:00", "is_default": true}
]"#;

fn coordinator(server: &mockito::Server, confirm: bool) -> ChecklistCoordinator {
    let config = ChecklistApiConfig::new(format!("{}/api", server.url()))
        .with_timeout(Duration::from_secs(5));
    let api = ReqwestChecklistApi::new(config, Arc::new(StaticAccessToken::new("tok"))).unwrap();
    ChecklistCoordinator::with_season(
        Arc::new(api),
        Arc::new(StaticConfirmation::new(confirm)),
        PropertyId::from(5),
        Season::Spring,
    )
}

async fn mock_spring_listing(server: &mut mockito::Server, hits: usize) -> mockito::Mock {
    server
        .mock("GET", "/api/maintenance/checklist/Spring/")
        .match_query(Matcher::UrlEncoded("property_id".into(), "5".into()))
        .match_header("authorization", "Bearer tok")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(SPRING_ITEMS)
        .expect(hits)
        .create_async()
        .await
}

#[tokio::test]
async fn load_computes_stats_from_backend_payload() {
    let mut server = mockito::Server::new_async().await;
    let listing = mock_spring_listing(&mut server, 1).await;

    let mut coordinator = coordinator(&server, true);
    coordinator.load().await.unwrap();

    listing.assert_async().await;
    assert_eq!(coordinator.stats().total_items, 2);
    assert_eq!(coordinator.stats().completion_percentage.value(), 50);
}

#[tokio::test]
async fn failed_toggle_refetches_and_restores() {
    let mut server = mockito::Server::new_async().await;
    let listing = mock_spring_listing(&mut server, 2).await;
    let toggle = server
        .mock("PUT", "/api/maintenance/checklist/11/toggle/")
        .with_status(500)
        .with_body(r#"{"error": "database unavailable"}"#)
        .expect(1)
        .create_async()
        .await;

    let mut coordinator = coordinator(&server, true);
    coordinator.load().await.unwrap();
    let before = coordinator.view().clone();

    let err = coordinator.toggle_item(&ChecklistItemId::from(11)).await.unwrap_err();

    toggle.assert_async().await;
    listing.assert_async().await;
    assert_eq!(err.kind(), ErrorKind::MutationFailed);
    assert_eq!(coordinator.view(), &before);
}

#[tokio::test]
async fn add_posts_then_refetches() {
    let mut server = mockito::Server::new_async().await;
    let listing = mock_spring_listing(&mut server, 2).await;
    let create = server
        .mock("POST", "/api/maintenance/checklist/")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "task": "Clean dryer vent",
            "season": "Spring",
            "property_id": 5,
            "is_default": false
        })))
        .with_status(201)
        .with_body(r#"{"id": 13, "task": "Clean dryer vent"}"#)
        .expect(1)
        .create_async()
        .await;

    let mut coordinator = coordinator(&server, true);
    coordinator.load().await.unwrap();
    coordinator
        .add_item(ItemDraft::new("Clean dryer vent", ""))
        .await
        .unwrap();

    create.assert_async().await;
    listing.assert_async().await;
    assert_eq!(coordinator.message(), Some("Checklist item added successfully!"));
}

#[tokio::test]
async fn load_failure_reports_fetch_failed_with_empty_view() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/maintenance/checklist/Spring/")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"error": "Authentication required"}"#)
        .create_async()
        .await;

    let mut coordinator = coordinator(&server, true);
    let err = coordinator.load().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::FetchFailed);
    assert_eq!(
        err.user_message(),
        "Failed to load Spring checklist. Please try again later."
    );
    assert!(coordinator.view().is_empty());
}

#[tokio::test]
async fn declined_delete_makes_no_request() {
    let mut server = mockito::Server::new_async().await;
    mock_spring_listing(&mut server, 1).await;
    let delete = server
        .mock("DELETE", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let mut coordinator = coordinator(&server, false);
    coordinator.load().await.unwrap();
    let outcome = coordinator.delete_item(&ChecklistItemId::from(11)).await.unwrap();

    assert_eq!(outcome, MutationOutcome::Cancelled);
    delete.assert_async().await;
}
