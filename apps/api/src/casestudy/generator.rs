//! Case-study generation — orchestrates the full pipeline.
//!
//! Flow: validate form → assemble prompt → LLM generate → resolve citation
//! placeholders (one lookup at a time) → integrate citations (skipped when
//! none resolved) → LLM guiding questions → build result.
//!
//! Failure policy: a failed generation or guiding-question call aborts the
//! submission and nothing is stored. Failed citation lookups and a failed
//! integration rewrite are absorbed (skip / deterministic fallback).

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::casestudy::assembler::{build_generation_prompt, validate_form};
use crate::casestudy::models::{CaseStudyForm, CaseStudyResult};
use crate::casestudy::prompts::QUESTIONS_PROMPT_TEMPLATE;
use crate::citations::integrator::integrate_citations;
use crate::citations::resolver::resolve_citations;
use crate::errors::AppError;
use crate::llm_client::prompts::{ACADEMIC_REVIEWER_SYSTEM, ACADEMIC_WRITER_SYSTEM};
use crate::llm_client::{Completion, CompletionRequest, LlmError, Message, GENERATION_MODEL};

/// Generates the raw case study (placeholders intact) from a validated form.
pub async fn generate_case_study(
    llm: &dyn Completion,
    form: &CaseStudyForm,
) -> Result<String, LlmError> {
    let request = CompletionRequest::new(
        GENERATION_MODEL,
        vec![
            Message::system(ACADEMIC_WRITER_SYSTEM),
            Message::user(build_generation_prompt(form)),
        ],
    );
    llm.complete(request).await
}

/// Generates 5-7 guiding questions for expanding the finished case study.
pub async fn generate_guiding_questions(
    llm: &dyn Completion,
    case_study: &str,
) -> Result<String, LlmError> {
    let request = CompletionRequest::new(
        GENERATION_MODEL,
        vec![
            Message::system(ACADEMIC_REVIEWER_SYSTEM),
            Message::user(QUESTIONS_PROMPT_TEMPLATE.replace("{case_study}", case_study)),
        ],
    );
    llm.complete(request).await
}

/// Runs the full pipeline for one submission and returns the finished
/// result. The caller owns storing it.
pub async fn run_pipeline(
    llm: &dyn Completion,
    form: CaseStudyForm,
) -> Result<CaseStudyResult, AppError> {
    validate_form(&form)?;

    info!("Generating case study '{}'", form.case_study_title.trim());
    let case_study = generate_case_study(llm, &form).await?;

    let resolved = resolve_citations(llm, &case_study).await;
    let references: Vec<String> = resolved.iter().map(|c| c.full_reference.clone()).collect();

    let final_case_study = integrate_citations(llm, &case_study, &resolved).await;

    let guiding_questions = generate_guiding_questions(llm, &final_case_study).await?;

    let result = CaseStudyResult {
        id: Uuid::new_v4(),
        title: form.case_study_title.trim().to_string(),
        author: form.author_name.trim().to_string(),
        case_study: final_case_study,
        references,
        guiding_questions,
        acknowledgements: form.acknowledgements,
        generated_at: Utc::now(),
    };

    info!(
        "Pipeline complete for result {} ({} reference(s))",
        result.id,
        result.references.len()
    );

    Ok(result)
}
