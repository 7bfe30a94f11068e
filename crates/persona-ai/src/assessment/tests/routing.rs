use super::common::*;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use crate::assessment::router::{result_handler, submit_handler};
use crate::assessment::service::AssessmentSubmission;
use crate::assessment::assessment_router;

fn submission() -> AssessmentSubmission {
    AssessmentSubmission {
        answers: answers(&[(1, 5), (2, 4), (9, 5), (11, 4), (19, 2), (20, 4)]),
        started_at: Some(timestamp(8, 0)),
    }
}

#[tokio::test]
async fn submit_handler_returns_conflict_on_duplicate() {
    let service = service_with(ConflictRepository);

    let response =
        submit_handler::<ConflictRepository>(State(service), axum::Json(submission())).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn submit_handler_returns_internal_error_on_repository_failure() {
    let service = service_with(UnavailableRepository);

    let response =
        submit_handler::<UnavailableRepository>(State(service), axum::Json(submission())).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("storage offline"));
}

#[tokio::test]
async fn result_handler_reports_missing_assessments() {
    let (service, _) = build_service();

    let response = result_handler::<MemoryRepository>(
        State(service),
        Path("asmt-unknown".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload,
        json!({ "assessment_id": "asmt-unknown", "error": "assessment not found" })
    );
}

#[tokio::test]
async fn submit_route_accepts_payloads() {
    let (service, _) = build_service();
    let router = assessment_router(service);

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/assessments")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&json!({
                        "answers": { "1": 5, "2": 4, "3": 3 }
                    }))
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["scores"]["disc"]["DISC_D"], json!(100.0));
    assert!(payload["insights"]["summary"]
        .as_str()
        .expect("summary")
        .contains("Dominance"));
    assert_eq!(payload["metadata"]["answered_items"], json!(3));
}

#[tokio::test]
async fn stored_results_are_retrievable_by_id() {
    let (service, _) = build_service();
    let stored = service.submit(submission()).expect("submission succeeds");
    let router = assessment_router(service);

    let response = router
        .oneshot(
            axum::http::Request::get(format!("/api/v1/assessments/{}", stored.id))
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["id"], json!(stored.id.0));
    assert_eq!(payload["scores"]["mbti_type"], json!(stored.scores.mbti_type));
}

#[tokio::test]
async fn recent_route_lists_summaries() {
    let (service, _) = build_service();
    let stored = service.submit(submission()).expect("submission succeeds");
    let router = assessment_router(service);

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/assessments")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let summaries = payload.as_array().expect("summary list");
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0]["id"], json!(stored.id.0));
    assert_eq!(summaries[0]["dominant_disc"], json!("D"));
}

#[tokio::test]
async fn items_route_lists_the_bank() {
    let (service, _) = build_service();
    let router = assessment_router(service);

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/items")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let items = payload.as_array().expect("item list");
    assert_eq!(items.len(), 32);
    assert_eq!(items[0]["id"], json!(1));
    assert_eq!(items[0]["category"], json!("DISC_D"));
}

#[tokio::test]
async fn malformed_payloads_are_rejected() {
    let (service, _) = build_service();
    let router = assessment_router(service);

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/assessments")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(r#"{"answers": "all fives"}"#))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert!(response.status().is_client_error());
}
