//! End-to-end router tests over an in-memory database.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower::util::ServiceExt;

use filing_api::stamp::LopdfBatesStamper;
use filing_api::{router, state::AppState};

const TOKEN: &str = "test-token";

async fn test_app() -> (axum::Router, SqlitePool) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let state = AppState::with_pool(pool.clone(), Arc::new(LopdfBatesStamper), TOKEN.into())
        .await
        .unwrap();
    (router(Arc::new(state)), pool)
}

async fn seed_case_and_draft(pool: &SqlitePool) {
    sqlx::query(
        r#"
        INSERT INTO cases (id, intake_json, parties_json, filing_json, signer_name)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind("case-1")
    .bind(r#"{"venue":"Circuit Court of Cook County","case_number":"2026-L-001234"}"#)
    .bind(r#"[{"role":"plaintiff","name":"Jane Doe"},{"role":"defendant","name":"Acme Corp"}]"#)
    .bind(r#"{"ignoredIssueIds":[]}"#)
    .bind("Jane Doe")
    .execute(pool)
    .await
    .unwrap();

    sqlx::query(
        r#"
        INSERT INTO drafts (id, case_id, title, plain_text)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind("draft-1")
    .bind("case-1")
    .bind("Motion to Compel")
    .bind("Per Smith v Jones, the plaintiff moves to compel discovery.")
    .execute(pool)
    .await
    .unwrap();
}

fn get(uri: &str, with_token: bool) -> Request<Body> {
    let builder = Request::builder().uri(uri);
    let builder = if with_token {
        builder.header(header::AUTHORIZATION, format!("Bearer {}", TOKEN))
    } else {
        builder
    };
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn health_is_open() {
    let (app, _pool) = test_app().await;
    let response = app.oneshot(get("/health", false)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn api_requires_bearer_token() {
    let (app, pool) = test_app().await;
    seed_case_and_draft(&pool).await;

    let response = app
        .clone()
        .oneshot(get("/api/cases/case-1/drafts/draft-1/readiness", false))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let bad = Request::builder()
        .uri("/api/cases/case-1/drafts/draft-1/readiness")
        .header(header::AUTHORIZATION, "Bearer wrong")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(bad).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_draft_is_404() {
    let (app, pool) = test_app().await;
    seed_case_and_draft(&pool).await;

    let response = app
        .oneshot(get("/api/cases/case-1/drafts/nope/compile", true))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn draft_under_the_wrong_case_is_404() {
    let (app, pool) = test_app().await;
    seed_case_and_draft(&pool).await;
    sqlx::query("INSERT INTO cases (id) VALUES ('case-2')")
        .execute(&pool)
        .await
        .unwrap();

    let response = app
        .oneshot(get("/api/cases/case-2/drafts/draft-1/compile", true))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn compile_returns_a_pdf_attachment() {
    let (app, pool) = test_app().await;
    seed_case_and_draft(&pool).await;

    let response = app
        .oneshot(get("/api/cases/case-1/drafts/draft-1/compile", true))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/pdf"
    );
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(disposition, "attachment; filename=\"draft-1.pdf\"");

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(body.starts_with(b"%PDF"));
}

#[tokio::test]
async fn invalid_bates_params_still_compile() {
    let (app, pool) = test_app().await;
    seed_case_and_draft(&pool).await;

    // prefix without start/width is invalid as a set, so stamping is skipped
    let response = app
        .oneshot(get(
            "/api/cases/case-1/drafts/draft-1/compile?prefix=DOE-",
            true,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn readiness_reports_citation_style() {
    let (app, pool) = test_app().await;
    seed_case_and_draft(&pool).await;

    let response = app
        .oneshot(get("/api/cases/case-1/drafts/draft-1/readiness", true))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let report: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let titles: Vec<&str> = report["issues"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|i| i["title"].as_str())
        .collect();
    assert!(titles
        .iter()
        .any(|t| t.contains("use \u{201C}v.\u{201D} in case names")));
}

#[tokio::test]
async fn ignored_issue_disappears_from_readiness() {
    let (app, pool) = test_app().await;
    seed_case_and_draft(&pool).await;

    let first = app
        .clone()
        .oneshot(get("/api/cases/case-1/drafts/draft-1/readiness", true))
        .await
        .unwrap();
    let body = first.into_body().collect().await.unwrap().to_bytes();
    let report: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let target_id = report["issues"][0]["id"].as_str().unwrap().to_string();

    let ignore = Request::builder()
        .method("POST")
        .uri(format!("/api/cases/case-1/issues/{}/ignore", target_id))
        .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(ignore).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let second = app
        .clone()
        .oneshot(get("/api/cases/case-1/drafts/draft-1/readiness", true))
        .await
        .unwrap();
    let body = second.into_body().collect().await.unwrap().to_bytes();
    let report: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(report["issues"]
        .as_array()
        .unwrap()
        .iter()
        .all(|i| i["id"].as_str() != Some(target_id.as_str())));
    assert_eq!(report["ignored"][0].as_str(), Some(target_id.as_str()));

    let unignore = Request::builder()
        .method("DELETE")
        .uri(format!("/api/cases/case-1/issues/{}/ignore", target_id))
        .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(unignore).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let third = app
        .oneshot(get("/api/cases/case-1/drafts/draft-1/readiness", true))
        .await
        .unwrap();
    let body = third.into_body().collect().await.unwrap().to_bytes();
    let report: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(report["issues"]
        .as_array()
        .unwrap()
        .iter()
        .any(|i| i["id"].as_str() == Some(target_id.as_str())));
}

#[tokio::test]
async fn settings_patch_merges_and_returns_the_result() {
    let (app, pool) = test_app().await;
    seed_case_and_draft(&pool).await;

    let patch = Request::builder()
        .method("PATCH")
        .uri("/api/cases/case-1/filing-settings")
        .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            r#"{"service":{"enabled":true,"defaultMethod":"mail"}}"#,
        ))
        .unwrap();
    let response = app.clone().oneshot(patch).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let patch_date = Request::builder()
        .method("PATCH")
        .uri("/api/cases/case-1/filing-settings")
        .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"service":{"date":"August 23, 2026"}}"#))
        .unwrap();
    let response = app.oneshot(patch_date).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let settings: serde_json::Value = serde_json::from_slice(&body).unwrap();
    // the second patch must not drop the first patch's fields
    assert_eq!(settings["service"]["enabled"].as_bool(), Some(true));
    assert_eq!(settings["service"]["defaultMethod"].as_str(), Some("mail"));
    assert_eq!(
        settings["service"]["date"].as_str(),
        Some("August 23, 2026")
    );
}
