//! Axum route handlers for the case-study API.
//!
//! The stepwise endpoints (`generate-case-study`, `enhance-citations`,
//! `integrate-citations`, `generate-questions`) mirror the SPA's original
//! call sequence; `POST /api/case-studies` runs the whole pipeline in one
//! request and stores the result for retrieval and download.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::casestudy::generator::{
    generate_case_study, generate_guiding_questions, run_pipeline,
};
use crate::casestudy::models::{CaseStudyForm, CaseStudyResult};
use crate::citations::integrator::{append_references, rewrite_with_citations};
use crate::citations::resolver::{apply_in_text, resolve_citations};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCaseStudyResponse {
    pub case_study: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceCitationsRequest {
    pub case_study: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceCitationsResponse {
    pub enhanced_case_study: String,
    pub references: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrateCitationsRequest {
    pub case_study: String,
    #[serde(default)]
    pub references: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrateCitationsResponse {
    pub integrated_case_study: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuestionsRequest {
    pub case_study: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateQuestionsResponse {
    pub questions: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Stepwise endpoints
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/generate-case-study
///
/// Validates the form and returns the raw generated case study with
/// citation placeholders intact. A generation failure surfaces as an
/// error; there is no fallback for this step.
pub async fn handle_generate_case_study(
    State(state): State<AppState>,
    Json(form): Json<CaseStudyForm>,
) -> Result<Json<GenerateCaseStudyResponse>, AppError> {
    crate::casestudy::assembler::validate_form(&form)?;

    let case_study = generate_case_study(&state.llm, &form).await?;

    Ok(Json(GenerateCaseStudyResponse { case_study }))
}

/// POST /api/enhance-citations
///
/// Resolves each distinct placeholder to a real source and returns the
/// naive-substituted text plus the reference list. Failed lookups leave
/// their placeholders untouched; this endpoint never fails on them.
pub async fn handle_enhance_citations(
    State(state): State<AppState>,
    Json(request): Json<EnhanceCitationsRequest>,
) -> Result<Json<EnhanceCitationsResponse>, AppError> {
    let resolved = resolve_citations(&state.llm, &request.case_study).await;
    let references = resolved.iter().map(|c| c.full_reference.clone()).collect();
    let enhanced_case_study = apply_in_text(&request.case_study, &resolved);

    Ok(Json(EnhanceCitationsResponse {
        enhanced_case_study,
        references,
    }))
}

/// POST /api/integrate-citations
///
/// Rewrites the case study so every supplied reference is cited in text
/// and a References section is appended. On rewrite failure the response
/// still succeeds, carrying the appended-list fallback and a warning.
pub async fn handle_integrate_citations(
    State(state): State<AppState>,
    Json(request): Json<IntegrateCitationsRequest>,
) -> Result<Json<IntegrateCitationsResponse>, AppError> {
    if request.references.is_empty() {
        return Ok(Json(IntegrateCitationsResponse {
            integrated_case_study: request.case_study,
            warning: None,
        }));
    }

    match rewrite_with_citations(&state.llm, &request.case_study, &request.references).await {
        Ok(integrated_case_study) => Ok(Json(IntegrateCitationsResponse {
            integrated_case_study,
            warning: None,
        })),
        Err(e) => {
            tracing::warn!("Error integrating citations: {e}; using fallback format");
            Ok(Json(IntegrateCitationsResponse {
                integrated_case_study: append_references(
                    &request.case_study,
                    &request.references,
                ),
                warning: Some(
                    "Error occurred during citation integration. Using fallback format."
                        .to_string(),
                ),
            }))
        }
    }
}

/// POST /api/generate-questions
///
/// Returns 5-7 guiding questions for expanding the case study.
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    Json(request): Json<GenerateQuestionsRequest>,
) -> Result<Json<GenerateQuestionsResponse>, AppError> {
    if request.case_study.trim().is_empty() {
        return Err(AppError::Validation("caseStudy cannot be empty".to_string()));
    }

    let questions = generate_guiding_questions(&state.llm, &request.case_study).await?;

    Ok(Json(GenerateQuestionsResponse { questions }))
}

// ────────────────────────────────────────────────────────────────────────────
// Full pipeline + session results
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/case-studies
///
/// Runs the whole pipeline (generate → resolve → integrate → questions),
/// stores the result in the session store, and returns it. Nothing is
/// stored when generation or the guiding-question step fails.
pub async fn handle_create_case_study(
    State(state): State<AppState>,
    Json(form): Json<CaseStudyForm>,
) -> Result<Json<CaseStudyResult>, AppError> {
    let result = run_pipeline(&state.llm, form).await?;
    state.sessions.insert(result.clone()).await;

    Ok(Json(result))
}

/// GET /api/case-studies/:id
pub async fn handle_get_case_study(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CaseStudyResult>, AppError> {
    let result = lookup(&state, id).await?;
    Ok(Json(result))
}

/// GET /api/case-studies/:id/download
///
/// The composed case study as a UTF-8 markdown attachment.
pub async fn handle_download_case_study(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let result = lookup(&state, id).await?;
    Ok(markdown_attachment("ai_case_study.md", result.to_markdown()))
}

/// GET /api/case-studies/:id/questions/download
pub async fn handle_download_questions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let result = lookup(&state, id).await?;
    Ok(markdown_attachment(
        "guiding_questions.md",
        result.guiding_questions,
    ))
}

async fn lookup(state: &AppState, id: Uuid) -> Result<CaseStudyResult, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Case study {id} not found")))
}

fn markdown_attachment(filename: &str, body: String) -> impl IntoResponse {
    (
        [
            (
                header::CONTENT_TYPE,
                "text/markdown; charset=utf-8".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrate_request_defaults_references() {
        let json = serde_json::json!({ "caseStudy": "Text" });
        let request: IntegrateCitationsRequest = serde_json::from_value(json).unwrap();
        assert!(request.references.is_empty());
    }

    #[test]
    fn test_responses_use_camel_case() {
        let response = EnhanceCitationsResponse {
            enhanced_case_study: "text".to_string(),
            references: vec![],
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("enhancedCaseStudy").is_some());
    }

    #[test]
    fn test_warning_omitted_when_none() {
        let response = IntegrateCitationsResponse {
            integrated_case_study: "text".to_string(),
            warning: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("warning").is_none());
    }
}
