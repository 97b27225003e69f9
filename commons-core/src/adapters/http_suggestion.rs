//! HTTP suggestion provider adapter
//!
//! Posts the topic to a drafting endpoint and expects a JSON body with
//! `title`, `description`, and 2-4 `options`. Any transport error, non-2xx
//! status, or malformed payload surfaces as an error; the suggestion service
//! substitutes the fixed fallback draft and never retries.

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::json;

use crate::domain::result::{Error, Result};
use crate::domain::ProposalSuggestion;
use crate::ports::SuggestionProvider;

/// Suggestion provider backed by an HTTP drafting endpoint
pub struct HttpSuggestionProvider {
    client: Client,
    endpoint: String,
}

impl HttpSuggestionProvider {
    /// Create a provider for the given endpoint with a request timeout
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::Suggestion(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl SuggestionProvider for HttpSuggestionProvider {
    fn name(&self) -> &str {
        "http"
    }

    fn suggest(&self, topic: &str) -> Result<ProposalSuggestion> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "topic": topic }))
            .send()
            .map_err(|e| Error::Suggestion(e.to_string()))?;

        let response = response
            .error_for_status()
            .map_err(|e| Error::Suggestion(e.to_string()))?;

        let suggestion: ProposalSuggestion = response
            .json()
            .map_err(|e| Error::Suggestion(e.to_string()))?;

        if !suggestion.is_well_formed() {
            return Err(Error::Suggestion(format!(
                "malformed suggestion: {} options",
                suggestion.options.len()
            )));
        }

        Ok(suggestion)
    }
}
