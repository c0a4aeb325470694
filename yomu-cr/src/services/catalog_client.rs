//! Comic catalog API client
//!
//! Talks to the external Comick-style catalog over HTTP. Two endpoints
//! matter: text search (`/v1.0/search?q=<title>&limit=<n>`) and detail
//! fetch (`/comic/<slug>?lang=<code>`).
//!
//! The catalog is an unreliable collaborator: it answers with `{}`, `[]`,
//! or an empty body about as readily as with data, and non-success status
//! codes carry no information the resolver can act on. Search folds all of
//! those into "no results"; detail reports them as typed errors that the
//! coordinator absorbs into absence.

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

use crate::config::ResolverConfig;
use crate::models::{DetailPayload, SearchHit};

const USER_AGENT: &str = concat!("yomu-cr/", env!("CARGO_PKG_VERSION"));

/// Catalog client errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Timeout, connection reset, DNS failure
    #[error("Network error: {0}")]
    Network(String),

    /// Body present but unparsable
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Non-success status on a detail fetch
    #[error("API error {0}: {1}")]
    Api(u16, String),
}

/// Source of catalog records.
///
/// The resolution pipeline depends on this trait rather than the concrete
/// HTTP client so tests can script catalog behavior in memory.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Text search. Returns hits in the catalog's relevance order,
    /// bounded to the configured page limit. Empty results and
    /// non-success statuses both come back as an empty vec.
    async fn search(&self, title: &str) -> Result<Vec<SearchHit>, CatalogError>;

    /// Full record for a slug, plus the live-only first-chapter pointer.
    /// `Ok(None)` means the catalog has nothing usable for this slug.
    async fn detail(&self, slug: &str) -> Result<Option<DetailPayload>, CatalogError>;
}

/// HTTP client for the comic catalog
pub struct ComickClient {
    http_client: reqwest::Client,
    base_url: String,
    lang: String,
    page_limit: usize,
}

#[derive(Serialize)]
struct SearchQuery<'a> {
    q: &'a str,
    limit: usize,
}

impl ComickClient {
    pub fn new(config: &ResolverConfig) -> Result<Self, CatalogError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.catalog_base_url.trim_end_matches('/').to_string(),
            lang: config.catalog_lang.clone(),
            page_limit: config.search_page_limit,
        })
    }
}

#[async_trait]
impl CatalogSource for ComickClient {
    async fn search(&self, title: &str) -> Result<Vec<SearchHit>, CatalogError> {
        let url = format!("{}/v1.0/search", self.base_url);

        tracing::debug!(title = %title, url = %url, "Searching catalog");

        let response = self
            .http_client
            .get(&url)
            .query(&SearchQuery {
                q: title,
                limit: self.page_limit,
            })
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // The catalog 404s and 500s freely on odd queries; a failed
            // search is indistinguishable from an empty one for our purposes.
            tracing::debug!(title = %title, status = %status, "Search returned non-success; treating as no results");
            return Ok(Vec::new());
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let mut hits = decode_search_body(&body)?;
        hits.truncate(self.page_limit);

        tracing::debug!(title = %title, hits = hits.len(), "Search complete");
        Ok(hits)
    }

    async fn detail(&self, slug: &str) -> Result<Option<DetailPayload>, CatalogError> {
        let url = format!("{}/comic/{}?lang={}", self.base_url, slug, self.lang);

        tracing::debug!(slug = %slug, url = %url, "Fetching catalog detail");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api(status.as_u16(), body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        decode_detail_body(&body)
    }
}

/// Decode a search response body. `{}`, `[]`, and empty bodies are the
/// catalog's ways of saying "nothing found".
fn decode_search_body(body: &str) -> Result<Vec<SearchHit>, CatalogError> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "{}" || trimmed == "[]" {
        return Ok(Vec::new());
    }

    serde_json::from_str(trimmed).map_err(|e| CatalogError::Malformed(e.to_string()))
}

/// Decode a detail response body, with the same empty-body tolerance
fn decode_detail_body(body: &str) -> Result<Option<DetailPayload>, CatalogError> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "{}" || trimmed == "[]" {
        return Ok(None);
    }

    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|e| CatalogError::Malformed(e.to_string()))
}
