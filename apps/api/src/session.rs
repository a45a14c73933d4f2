//! In-memory session results.
//!
//! Each submission that completes the pipeline gets its own entry, keyed
//! by the result id. Nothing is persisted; restarting the process forgets
//! everything, matching the one-browser-session lifecycle of the results.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::casestudy::models::CaseStudyResult;

#[derive(Clone, Default)]
pub struct SessionStore {
    results: Arc<RwLock<HashMap<Uuid, CaseStudyResult>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, result: CaseStudyResult) {
        self.results.write().await.insert(result.id, result);
    }

    pub async fn get(&self, id: Uuid) -> Option<CaseStudyResult> {
        self.results.read().await.get(&id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn result() -> CaseStudyResult {
        CaseStudyResult {
            id: Uuid::new_v4(),
            title: "Title".to_string(),
            author: "Author".to_string(),
            case_study: "Body".to_string(),
            references: vec![],
            guiding_questions: "Questions".to_string(),
            acknowledgements: String::new(),
            generated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_then_get() {
        let store = SessionStore::new();
        let r = result();
        let id = r.id;
        store.insert(r).await;
        assert_eq!(store.get(id).await.unwrap().title, "Title");
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let store = SessionStore::new();
        assert!(store.get(Uuid::new_v4()).await.is_none());
    }
}
