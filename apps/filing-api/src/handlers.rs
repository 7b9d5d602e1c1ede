//! HTTP handlers for the filing API.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::{DbCase, DbDraft};
use crate::state::AppState;
use filing_compiler::{compile_and_stamp, BatesConfig, CompileInput, SignatureBlock};
use filing_types::{FilingSettings, FilingSettingsPatch, ReadinessReport};
use readiness_engine::{AnalyzeInput, ReadinessEngine};

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// Bearer-token check applied by every `/api` handler.
fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    match presented {
        Some(token) if token == state.api_token => Ok(()),
        _ => Err(ApiError::Unauthorized),
    }
}

async fn load_case(state: &AppState, case_id: &str) -> Result<DbCase, ApiError> {
    let case: Option<DbCase> = sqlx::query_as(
        r#"
        SELECT id, intake_json, parties_json, exhibits_json, authorities_json,
               filing_json, signer_name, signer_title, signature_image
        FROM cases
        WHERE id = ?
        "#,
    )
    .bind(case_id)
    .fetch_optional(&state.db)
    .await?;
    case.ok_or_else(|| ApiError::CaseNotFound(case_id.to_string()))
}

async fn load_draft(
    state: &AppState,
    case_id: &str,
    draft_id: &str,
) -> Result<DbDraft, ApiError> {
    let draft: Option<DbDraft> = sqlx::query_as(
        r#"
        SELECT id, case_id, title, content_json, plain_text
        FROM drafts
        WHERE id = ? AND case_id = ?
        "#,
    )
    .bind(draft_id)
    .bind(case_id)
    .fetch_optional(&state.db)
    .await?;
    draft.ok_or_else(|| ApiError::DraftNotFound(draft_id.to_string()))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatesQuery {
    pub prefix: Option<String>,
    pub bates_start: Option<u32>,
    pub bates_width: Option<u32>,
}

/// Compile a draft to PDF, optionally Bates-stamped.
pub async fn compile_draft(
    State(state): State<Arc<AppState>>,
    Path((case_id, draft_id)): Path<(String, String)>,
    Query(query): Query<BatesQuery>,
    headers: HeaderMap,
) -> Result<(StatusCode, [(header::HeaderName, String); 2], Vec<u8>), ApiError> {
    authorize(&state, &headers)?;
    let case = load_case(&state, &case_id).await?;
    let draft = load_draft(&state, &case_id, &draft_id).await?;

    // Invalid or partial Bates parameters skip stamping rather than fail the
    // whole compile.
    let bates = match BatesConfig::from_query(query.prefix, query.bates_start, query.bates_width)
    {
        Ok(config) => config,
        Err(reason) => {
            tracing::warn!("Skipping Bates stamping: {}", reason);
            None
        }
    };

    let input = CompileInput {
        draft_id: draft.id.clone(),
        title: draft.title.clone().unwrap_or_default(),
        blocks: draft.blocks()?,
        plain_text: draft.plain_text.clone(),
        intake: case.intake()?,
        parties: case.parties()?,
        filing: case.filing()?,
        signature: SignatureBlock {
            dated: None,
            signer_name: case.signer_name.clone(),
            signer_title: case.signer_title.clone(),
            image: case.signature_image.clone(),
        },
    };

    let pdf = compile_and_stamp(&input, state.stamper.as_ref(), bates.as_ref())?;

    tracing::info!("Compiled draft {} ({} bytes)", draft.id, pdf.len());
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}.pdf\"", draft.id),
            ),
        ],
        pdf,
    ))
}

/// Run the readiness analyzer over a draft.
pub async fn draft_readiness(
    State(state): State<Arc<AppState>>,
    Path((case_id, draft_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<ReadinessReport>, ApiError> {
    authorize(&state, &headers)?;
    let case = load_case(&state, &case_id).await?;
    let draft = load_draft(&state, &case_id, &draft_id).await?;

    let input = AnalyzeInput {
        blocks: draft.blocks()?,
        plain_text: draft.plain_text.clone(),
        intake: case.intake()?,
        parties: case.parties()?,
        exhibits: case.exhibits()?,
        authorities: case.authorities()?,
        filing: case.filing()?,
    };

    Ok(Json(ReadinessEngine::analyze(&input)))
}

async fn store_filing(
    state: &AppState,
    case_id: &str,
    settings: &FilingSettings,
) -> Result<(), ApiError> {
    let json = serde_json::to_string(settings).map_err(|e| ApiError::Internal(e.into()))?;
    sqlx::query(
        r#"
        UPDATE cases SET filing_json = ?, updated_at = datetime('now') WHERE id = ?
        "#,
    )
    .bind(json)
    .bind(case_id)
    .execute(&state.db)
    .await?;
    Ok(())
}

/// Partially update a case's filing settings; returns the merged result.
pub async fn patch_filing_settings(
    State(state): State<Arc<AppState>>,
    Path(case_id): Path<String>,
    headers: HeaderMap,
    Json(patch): Json<FilingSettingsPatch>,
) -> Result<Json<FilingSettings>, ApiError> {
    authorize(&state, &headers)?;
    let case = load_case(&state, &case_id).await?;

    let mut settings = case.filing()?;
    settings.apply_patch(patch);
    store_filing(&state, &case_id, &settings).await?;

    Ok(Json(settings))
}

/// Add an issue id to the case's ignore list.
pub async fn ignore_issue(
    State(state): State<Arc<AppState>>,
    Path((case_id, issue_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<FilingSettings>, ApiError> {
    authorize(&state, &headers)?;
    let case = load_case(&state, &case_id).await?;

    let mut settings = case.filing()?;
    settings.ignored_issue_ids.insert(issue_id);
    store_filing(&state, &case_id, &settings).await?;

    Ok(Json(settings))
}

/// Remove an issue id from the case's ignore list.
pub async fn unignore_issue(
    State(state): State<Arc<AppState>>,
    Path((case_id, issue_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<FilingSettings>, ApiError> {
    authorize(&state, &headers)?;
    let case = load_case(&state, &case_id).await?;

    let mut settings = case.filing()?;
    settings.ignored_issue_ids.remove(&issue_id);
    store_filing(&state, &case_id, &settings).await?;

    Ok(Json(settings))
}
