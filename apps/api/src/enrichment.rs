//! Recipient enrichment: resolves an email address to person/company
//! profile data via Clearbit's combined lookup.
//!
//! Results are fetched fresh per request, never cached or stored.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

const CLEARBIT_API_URL: &str = "https://person.clearbit.com";

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("lookup returned status {0}")]
    Status(u16),
}

// Wire types. The lookup service omits whole sub-objects it knows nothing
// about, so every field is optional.

#[derive(Debug, Default, Deserialize)]
pub struct CombinedLookup {
    pub person: Option<PersonRecord>,
    pub company: Option<CompanyRecord>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PersonRecord {
    pub id: Option<String>,
    pub name: Option<PersonName>,
    pub employment: Option<Employment>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PersonName {
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Employment {
    pub title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CompanyRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// The profile fields prompt composition actually uses, with fallbacks
/// already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipientProfile {
    /// Person's full name, or the submitted email when unknown.
    pub full_name: String,
    /// Job title, or "employee" when unknown.
    pub title: String,
    pub company_name: Option<String>,
    /// Company description, or empty when unknown.
    pub company_description: String,
}

impl RecipientProfile {
    /// Flattens a lookup result, degrading every absent field to its fallback.
    pub fn from_lookup(lookup: CombinedLookup, email: &str) -> Self {
        let person = lookup.person.unwrap_or_default();
        let company = lookup.company.unwrap_or_default();

        RecipientProfile {
            full_name: person
                .name
                .and_then(|n| n.full_name)
                .unwrap_or_else(|| email.to_string()),
            title: person
                .employment
                .and_then(|e| e.title)
                .unwrap_or_else(|| "employee".to_string()),
            company_name: company.name,
            company_description: company.description.unwrap_or_default(),
        }
    }
}

/// Client for the combined person/company lookup API.
#[derive(Clone)]
pub struct LookupClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl LookupClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, CLEARBIT_API_URL.to_string())
    }

    /// Points the client at an alternate host. Used by tests to stub the API.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            base_url,
        }
    }

    /// GET /v2/combined/find?email=… with a bearer credential.
    pub async fn find(&self, email: &str) -> Result<CombinedLookup, LookupError> {
        let response = self
            .client
            .get(format!("{}/v2/combined/find", self.base_url))
            .query(&[("email", email)])
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!("Lookup for {email} failed with status {status}");
            return Err(LookupError::Status(status.as_u16()));
        }

        let lookup: CombinedLookup = response.json().await?;
        debug!(
            "Lookup for {email} matched person {:?}, company {:?}",
            lookup.person.as_ref().and_then(|p| p.id.as_deref()),
            lookup.company.as_ref().and_then(|c| c.id.as_deref())
        );
        Ok(lookup)
    }
}
