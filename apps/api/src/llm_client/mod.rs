/// Completion client: the single point of entry for all OpenAI calls.
///
/// ARCHITECTURAL RULE: No other module may call the completion API directly.
/// All completion requests MUST go through this module.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const OPENAI_API_URL: &str = "https://api.openai.com";
/// The model used for all copy generation.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "text-davinci-002";
const MAX_TOKENS: u32 = 256;
const TEMPERATURE: f64 = 0.7;
const TOP_P: f64 = 1.0;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("completion returned no candidates")]
    EmptyChoices,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f64,
    top_p: f64,
    frequency_penalty: f64,
    presence_penalty: f64,
    best_of: u32,
    echo: bool,
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub text: String,
}

impl CompletionResponse {
    /// Text of the first candidate, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.choices.first().map(|c| c.text.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

/// The single completion client shared by all route handlers.
/// One request per invocation; failures are surfaced to the caller, never retried.
#[derive(Clone)]
pub struct CompletionClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl CompletionClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, OPENAI_API_URL.to_string())
    }

    /// Points the client at an alternate host. Used by tests to stub the API.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            base_url,
        }
    }

    /// Requests a single completion for `prompt` with the fixed sampling parameters.
    pub async fn complete(&self, prompt: &str) -> Result<CompletionResponse, CompletionError> {
        let request_body = CompletionRequest {
            model: MODEL,
            prompt,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            top_p: TOP_P,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            best_of: 1,
            echo: false,
        };

        let response = self
            .client
            .post(format!("{}/v1/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Prefer the structured error message when the body parses
            let message = serde_json::from_str::<OpenAiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: CompletionResponse = response.json().await?;

        debug!(
            "Completion {} returned {} candidate(s)",
            completion.id,
            completion.choices.len()
        );

        Ok(completion)
    }
}
