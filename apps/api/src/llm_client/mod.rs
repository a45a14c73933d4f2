/// LLM Client — the single point of entry for all OpenAI API calls.
///
/// ARCHITECTURAL RULE: No other module may call the OpenAI API directly.
/// All completion requests MUST go through this module.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
/// The model used for case-study generation, citation integration,
/// and guiding questions. Hardcoded to prevent accidental drift.
pub const GENERATION_MODEL: &str = "gpt-4.1";
/// Search-capable model used for per-placeholder citation discovery.
pub const SEARCH_MODEL: &str = "gpt-4o-search-preview";
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// One entry in the message list sent to the completion endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub role: &'static str,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

/// A single completion request: model, ordered messages, and an optional
/// web-search toggle (used only for citation discovery).
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: &'static str,
    pub messages: Vec<Message>,
    pub web_search: bool,
}

impl CompletionRequest {
    pub fn new(model: &'static str, messages: Vec<Message>) -> Self {
        Self {
            model,
            messages,
            web_search: false,
        }
    }

    pub fn with_web_search(mut self) -> Self {
        self.web_search = true;
        self
    }
}

/// Seam between the pipeline and the network. The pipeline only ever sees
/// this trait, so tests can script responses without an API key.
#[async_trait]
pub trait Completion: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    web_search_options: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

/// The single LLM client used by all services.
/// Wraps the Chat Completions API with retry logic.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Makes a raw call to the Chat Completions API.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    async fn call(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let body = ChatCompletionBody {
            model: request.model,
            messages: &request.messages,
            web_search_options: request.web_search.then(|| serde_json::json!({})),
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(OPENAI_API_URL)
                .bearer_auth(&self.api_key)
                .header("content-type", "application/json")
                .json(&body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                // Try to parse error message
                let message = serde_json::from_str::<OpenAiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let parsed: ChatCompletionResponse =
                response.json().await.map_err(LlmError::Http)?;

            if let Some(usage) = &parsed.usage {
                debug!(
                    "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                    usage.prompt_tokens, usage.completion_tokens
                );
            }

            return first_choice_text(parsed);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl Completion for LlmClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        self.call(&request).await
    }
}

/// Extracts the first choice's text content, rejecting empty responses.
fn first_choice_text(response: ChatCompletionResponse) -> Result<String, LlmError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|text| !text.trim().is_empty())
        .ok_or(LlmError::EmptyContent)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with(content: Option<&str>) -> ChatCompletionResponse {
        ChatCompletionResponse {
            choices: vec![Choice {
                message: ChoiceMessage {
                    content: content.map(|s| s.to_string()),
                },
            }],
            usage: None,
        }
    }

    #[test]
    fn test_first_choice_text_returns_content() {
        let text = first_choice_text(response_with(Some("Generated text"))).unwrap();
        assert_eq!(text, "Generated text");
    }

    #[test]
    fn test_first_choice_text_rejects_missing_content() {
        assert!(matches!(
            first_choice_text(response_with(None)),
            Err(LlmError::EmptyContent)
        ));
    }

    #[test]
    fn test_first_choice_text_rejects_blank_content() {
        assert!(matches!(
            first_choice_text(response_with(Some("   \n"))),
            Err(LlmError::EmptyContent)
        ));
    }

    #[test]
    fn test_first_choice_text_rejects_no_choices() {
        let response = ChatCompletionResponse {
            choices: vec![],
            usage: None,
        };
        assert!(matches!(
            first_choice_text(response),
            Err(LlmError::EmptyContent)
        ));
    }

    #[test]
    fn test_web_search_body_serialization() {
        let request =
            CompletionRequest::new(SEARCH_MODEL, vec![Message::user("find a source")])
                .with_web_search();
        let body = ChatCompletionBody {
            model: request.model,
            messages: &request.messages,
            web_search_options: request.web_search.then(|| serde_json::json!({})),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-4o-search-preview");
        assert_eq!(json["web_search_options"], serde_json::json!({}));
    }

    #[test]
    fn test_web_search_omitted_when_disabled() {
        let request = CompletionRequest::new(GENERATION_MODEL, vec![Message::user("hi")]);
        let body = ChatCompletionBody {
            model: request.model,
            messages: &request.messages,
            web_search_options: request.web_search.then(|| serde_json::json!({})),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("web_search_options").is_none());
    }
}
