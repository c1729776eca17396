//! Client for the managed AI search (AutoRAG) REST endpoint.
//!
//! One POST per search: the query and a result-count hint go up, the
//! generated answer (if any) comes back.

use crate::config::AiSearchSettings;
use crate::models::{AiSearchEnvelope, AiSearchRequest};
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use service_core::observability::TracedClientExt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiSearchError {
    #[error("AI search not configured: {0} is missing")]
    NotConfigured(&'static str),

    #[error("AI search request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("AI search API failed: {status}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to decode AI search response: {0}")]
    Decode(#[source] reqwest::Error),
}

pub struct AiSearchClient {
    client: Client,
    settings: AiSearchSettings,
}

impl AiSearchClient {
    pub fn new(settings: AiSearchSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    /// Check if all upstream credentials are present.
    pub fn is_configured(&self) -> bool {
        self.settings.missing_fields().is_empty()
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.settings.missing_fields()
    }

    /// Endpoint for the configured account and search instance.
    pub fn search_url(&self) -> Result<String, AiSearchError> {
        let account_id = required(self.settings.account_id.as_deref(), "account_id")?;
        let rag_name = required(self.settings.rag_name.as_deref(), "rag_name")?;

        Ok(format!(
            "{}/accounts/{}/autorag/rags/{}/ai-search",
            self.settings.api_base_url.trim_end_matches('/'),
            account_id,
            rag_name
        ))
    }

    /// Run one search and return the generated answer, if the upstream produced one.
    ///
    /// `request_id` is forwarded as `x-request-id` for correlation.
    pub async fn search(
        &self,
        query: &str,
        request_id: Option<&str>,
    ) -> Result<Option<String>, AiSearchError> {
        let url = self.search_url()?;
        let token = required(
            self.settings
                .api_token
                .as_ref()
                .map(|token| token.expose_secret().as_str()),
            "api_token",
        )?;

        let body = AiSearchRequest {
            query,
            top_k: self.settings.top_k,
        };

        tracing::debug!(
            query_len = query.len(),
            top_k = self.settings.top_k,
            "Sending request to AI search API"
        );

        let response = self
            .client
            .traced_post(&url)
            .bearer_auth(token)
            .json(&body)
            .send_with_request_id(request_id)
            .await
            .map_err(AiSearchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "AI search API error");
            return Err(AiSearchError::Status { status, body });
        }

        let envelope: AiSearchEnvelope = response.json().await.map_err(AiSearchError::Decode)?;

        Ok(envelope.into_answer())
    }
}

fn required<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, AiSearchError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(AiSearchError::NotConfigured(field))
}
