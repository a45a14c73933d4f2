use crate::llm_client::LlmClient;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// In-memory per-submission results; replaced wholesale per submission.
    pub sessions: SessionStore,
}
