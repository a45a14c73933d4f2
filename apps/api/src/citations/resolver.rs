//! Citation Resolver — finds `(placeholder: topic)` markers in generated
//! text and looks up one real academic source per distinct placeholder.
//!
//! Failure policy: a failed lookup is logged and skipped; the placeholder
//! stays in the text untouched. Partial resolution is acceptable and must
//! never abort the pipeline.

use std::sync::OnceLock;

use regex::Regex;
use tracing::{info, warn};

use crate::casestudy::prompts::SOURCE_SEARCH_PROMPT_TEMPLATE;
use crate::llm_client::{Completion, CompletionRequest, Message, SEARCH_MODEL};

/// A placeholder resolved to a real source: the exact original marker text
/// (including the literal wrapping, so raw substitution can find it), the
/// short in-text token, and the full APA reference entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCitation {
    pub placeholder: String,
    pub in_text: String,
    pub full_reference: String,
}

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\(placeholder:?\s*([^)]+)\)").expect("valid regex"))
}

fn author_year_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([^(]+)\((\d{4})").expect("valid regex"))
}

/// A placeholder occurrence: the exact matched substring and its topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub full: String,
    pub topic: String,
}

/// Extracts distinct placeholders in order of first appearance, keyed by
/// the exact matched substring. Identical markers collapse to one entry,
/// so each topic is looked up once.
pub fn extract_placeholders(text: &str) -> Vec<Placeholder> {
    let mut seen = Vec::new();
    for captures in placeholder_regex().captures_iter(text) {
        let full = captures.get(0).expect("whole match").as_str();
        if seen.iter().any(|p: &Placeholder| p.full == full) {
            continue;
        }
        seen.push(Placeholder {
            full: full.to_string(),
            topic: captures[1].trim().to_string(),
        });
    }
    seen
}

/// Builds the short in-text token from a full reference entry by parsing a
/// leading `Author (Year` pattern. An unparseable entry gets the literal
/// `(Author, YYYY)` token rather than failing the pipeline.
pub fn in_text_token(citation: &str) -> String {
    match author_year_regex().captures(citation) {
        Some(captures) => {
            let author = captures[1]
                .trim()
                .split(',')
                .next()
                .unwrap_or("")
                .trim()
                .to_string();
            let year = &captures[2];
            format!("({author}, {year})")
        }
        None => "(Author, YYYY)".to_string(),
    }
}

/// Resolves every distinct placeholder in `text` with one sequential
/// completion per topic, web search enabled. Returns the resolutions in
/// order of first appearance; failed lookups are simply absent.
pub async fn resolve_citations(llm: &dyn Completion, text: &str) -> Vec<ResolvedCitation> {
    let placeholders = extract_placeholders(text);
    if placeholders.is_empty() {
        return vec![];
    }

    info!("Resolving {} citation placeholder(s)", placeholders.len());

    let mut resolved = Vec::new();

    for placeholder in placeholders {
        let prompt = SOURCE_SEARCH_PROMPT_TEMPLATE.replace("{topic}", &placeholder.topic);
        let request =
            CompletionRequest::new(SEARCH_MODEL, vec![Message::user(prompt)]).with_web_search();

        match llm.complete(request).await {
            Ok(reply) => {
                let citation = reply.trim().to_string();
                let in_text = in_text_token(&citation);
                info!("Mapped '{}' to {}", placeholder.full, in_text);
                resolved.push(ResolvedCitation {
                    placeholder: placeholder.full,
                    in_text,
                    full_reference: citation,
                });
            }
            Err(e) => {
                warn!(
                    "Error finding citation for '{}': {e}; leaving placeholder unresolved",
                    placeholder.topic
                );
            }
        }
    }

    resolved
}

/// Naive substitution: replaces every occurrence of each resolved
/// placeholder with its in-text token. Unresolved placeholders are left
/// untouched.
pub fn apply_in_text(text: &str, resolved: &[ResolvedCitation]) -> String {
    let mut out = text.to_string();
    for citation in resolved {
        out = out.replace(&citation.placeholder, &citation.in_text);
    }
    out
}
