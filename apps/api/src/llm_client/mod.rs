/// LLM Client: the single point of entry for all Claude API calls in the tailor service.
///
/// ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
/// Everything downstream talks to the `TextGenerator` trait so that the ATS
/// fallback paths can be exercised without a network.
///
/// Model: claude-sonnet-4-5 (hardcoded)
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod json;
pub mod prompts;
pub mod retry;
#[cfg(test)]
pub mod testing;

pub use json::JsonShape;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Substrings that mark a failure as rate limiting / quota exhaustion.
const QUOTA_MARKERS: &[&str] = &[
    "429",
    "rate limit",
    "rate_limit",
    "quota",
    "resource has been exhausted",
];

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited: {message}")]
    RateLimited { message: String },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("Malformed LLM response: {0}")]
    MalformedResponse(String),
}

impl LlmError {
    /// True when the failure means the remote quota is spent. Callers switch to
    /// their local fallback for good once they see this.
    pub fn is_quota_exhausted(&self) -> bool {
        match self {
            LlmError::RateLimited { .. } => true,
            LlmError::Api { status, message } => {
                *status == StatusCode::TOO_MANY_REQUESTS.as_u16() || mentions_quota(message)
            }
            LlmError::Http(e) => {
                e.status() == Some(StatusCode::TOO_MANY_REQUESTS) || mentions_quota(&e.to_string())
            }
            LlmError::Parse(_) | LlmError::EmptyContent | LlmError::MalformedResponse(_) => false,
        }
    }
}

fn mentions_quota(message: &str) -> bool {
    let lower = message.to_lowercase();
    QUOTA_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Remote text generation. Takes a prompt and a system prompt, returns the raw
/// completion text. Callers are responsible for locating JSON inside it.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError>;
}

/// Calls the generator and parses the JSON payload embedded in its answer.
pub async fn call_json<T: DeserializeOwned>(
    llm: &dyn TextGenerator,
    prompt: &str,
    system: &str,
    shape: JsonShape,
) -> Result<T, LlmError> {
    let text = llm.complete(prompt, system).await?;
    json::parse_embedded(&text, shape)
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Anthropic Messages API client. One HTTP attempt per call; retry policy
/// belongs to the caller (see `retry::with_backoff`) because the ATS code
/// needs to see rate limits as soon as they happen.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, api_key })
    }

    /// Makes a raw call to the Claude API, returning the full response object.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<LlmResponse, LlmError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);

            if status == StatusCode::TOO_MANY_REQUESTS {
                warn!("LLM API rate limited: {}", message);
                return Err(LlmError::RateLimited { message });
            }

            warn!("LLM API returned {}: {}", status, message);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let llm_response: LlmResponse = response.json().await?;

        debug!(
            "LLM call succeeded: input_tokens={}, output_tokens={}",
            llm_response.usage.input_tokens, llm_response.usage.output_tokens
        );

        Ok(llm_response)
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let response = self.call(prompt, system).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}
