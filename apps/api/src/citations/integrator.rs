//! Citation Integrator — rewrites the case study with proper in-text
//! citations and an appended References section.
//!
//! Primary path is a single best-effort LLM rewrite; its output is trusted
//! as returned. If that request fails, a deterministic fallback substitutes
//! the recorded in-text tokens and appends the reference list. Enrichment
//! failures never surface to the user.

use tracing::{info, warn};

use crate::casestudy::prompts::INTEGRATION_PROMPT_TEMPLATE;
use crate::citations::resolver::{apply_in_text, ResolvedCitation};
use crate::llm_client::prompts::ACADEMIC_WRITER_SYSTEM;
use crate::llm_client::{Completion, CompletionRequest, LlmError, Message, GENERATION_MODEL};

/// Appends a plain References section. Identity when `references` is empty.
pub fn append_references(text: &str, references: &[String]) -> String {
    if references.is_empty() {
        return text.to_string();
    }
    format!("{text}\n\n## References\n\n{}", references.join("\n\n"))
}

/// Deterministic fallback: literal in-text substitution for every recorded
/// placeholder, then the reference list in resolution order. Pure string
/// operations; never fails.
pub fn fallback_integration(text: &str, resolved: &[ResolvedCitation]) -> String {
    let references: Vec<String> = resolved.iter().map(|c| c.full_reference.clone()).collect();
    append_references(&apply_in_text(text, resolved), &references)
}

/// Single LLM rewrite integrating the references. The caller decides what
/// to do on failure.
pub async fn rewrite_with_citations(
    llm: &dyn Completion,
    case_study: &str,
    references: &[String],
) -> Result<String, LlmError> {
    let prompt = INTEGRATION_PROMPT_TEMPLATE
        .replace("{case_study}", case_study)
        .replace("{references}", &references.join("\n"));

    let request = CompletionRequest::new(
        GENERATION_MODEL,
        vec![
            Message::system(ACADEMIC_WRITER_SYSTEM),
            Message::user(prompt),
        ],
    );

    llm.complete(request).await
}

/// Full integration step for the pipeline: short-circuits when nothing was
/// resolved, otherwise attempts the rewrite and falls back to deterministic
/// substitution on request failure.
pub async fn integrate_citations(
    llm: &dyn Completion,
    case_study: &str,
    resolved: &[ResolvedCitation],
) -> String {
    if resolved.is_empty() {
        return case_study.to_string();
    }

    let references: Vec<String> = resolved.iter().map(|c| c.full_reference.clone()).collect();

    match rewrite_with_citations(llm, case_study, &references).await {
        Ok(integrated) => {
            info!("Integrated {} reference(s) into the case study", references.len());
            integrated
        }
        Err(e) => {
            warn!("Error integrating citations: {e}; using fallback substitution");
            fallback_integration(case_study, resolved)
        }
    }
}
