//! The generation pipeline: request log, optional recipient lookup, prompt
//! composition, one completion call.
//!
//! Flow: values → (optional) lookup → compose prompt → complete.
//! Every failure is caught at the top level and folded into the uniform
//! `{values, logs, error}` envelope. Nothing is retried; the first failure
//! is terminal for the request.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::enrichment::{LookupError, RecipientProfile};
use crate::generation::prompts::{compose_direct_prompt, compose_enriched_prompt};
use crate::generation::request_log::RequestLog;
use crate::llm_client::CompletionError;
use crate::state::AppState;

/// Errors that can interrupt a single generation request. They reach the
/// caller only as log text plus a stringified message.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Deliberately generic: all lookup failures read the same to the caller.
    #[error("Could not look up a profile for that email address")]
    Lookup(#[source] LookupError),

    #[error("Recipient lookup is not configured on this server")]
    LookupUnavailable,

    #[error("{0}")]
    Completion(#[from] CompletionError),
}

/// Response envelope for one generation request. Exactly one of `result`
/// and `error` is present; the other is omitted from the JSON.
#[derive(Debug, Serialize)]
pub struct GenerationResponse {
    pub values: BTreeMap<String, String>,
    pub logs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Runs one full generation request, converting any failure into the
/// uniform error envelope.
pub async fn run_generation(
    state: &AppState,
    values: BTreeMap<String, String>,
) -> GenerationResponse {
    let mut log = RequestLog::new();
    log.push("Started");

    match generate(state, &values, &mut log).await {
        Ok(result) => {
            let elapsed = log.elapsed_ms();
            log.push(format!("Completed in {elapsed}ms"));
            GenerationResponse {
                values,
                logs: log.into_entries(),
                result: Some(result),
                error: None,
            }
        }
        Err(e) => {
            warn!("Generation failed: {e}");
            log.push("Errored");
            GenerationResponse {
                values,
                logs: log.into_entries(),
                result: None,
                error: Some(e.to_string()),
            }
        }
    }
}

/// The fallible middle of the pipeline. The caller owns the log so the
/// final `Completed`/`Errored` entry lands after any early return.
async fn generate(
    state: &AppState,
    values: &BTreeMap<String, String>,
    log: &mut RequestLog,
) -> Result<String, GenerationError> {
    let email = values.get("email").map(String::as_str).unwrap_or_default();

    let prompt = if email.is_empty() {
        compose_direct_prompt(values)
    } else {
        let lookup = state
            .lookup
            .as_ref()
            .ok_or(GenerationError::LookupUnavailable)?;
        log.push(format!("Looking up profile for {email}"));
        let combined = lookup.find(email).await.map_err(GenerationError::Lookup)?;
        let profile = RecipientProfile::from_lookup(combined, email);
        log.push(format!("Resolved {email} to {}", profile.full_name));
        compose_enriched_prompt(values, &profile)
    };

    log.push("Sending request to OpenAI");
    let completion = state.llm.complete(&prompt).await?;
    log.push(format!("Got response from OpenAI with ID {}", completion.id));

    let text = completion
        .first_text()
        .ok_or(CompletionError::EmptyChoices)?;
    Ok(text.to_string())
}
