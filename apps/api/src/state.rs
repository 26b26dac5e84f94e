use crate::enrichment::LookupClient;
use crate::llm_client::CompletionClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: CompletionClient,
    /// Present only when CLEARBIT_API_KEY is configured.
    pub lookup: Option<LookupClient>,
}
