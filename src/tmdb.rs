use std::{num::NonZeroU32, sync::Arc};

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::CandidateMatch,
};

/// Stateless client for the TMDB search endpoint. Credentials come from the
/// environment: the API key rides as a query parameter, the access token as
/// a bearer Authorization header.
pub struct TmdbClient {
    client: reqwest::Client,
    api_key: String,
    access_token: String,
    base_url: String,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl TmdbClient {
    pub fn new(
        client: reqwest::Client,
        api_key: String,
        access_token: String,
        base_url: String,
        rps: u32,
    ) -> Self {
        if access_token.trim().is_empty() {
            tracing::warn!("no TMDB_ACCESS_TOKEN provided, catalog searches will fail");
        }

        let limiter =
            Arc::new(RateLimiter::direct(Quota::per_second(NonZeroU32::new(rps.max(1)).unwrap())));
        Self { client, api_key, access_token, base_url, limiter }
    }

    /// Resolves a free-text title into candidate matches. Not cached and not
    /// retried; any non-success status surfaces as an upstream failure.
    pub async fn search(&self, title: &str) -> AppResult<Vec<CandidateMatch>> {
        self.limiter.until_ready().await;

        let url = format!("{}/search/movie", self.base_url.trim_end_matches('/'));
        let resp = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .query(&[("api_key", self.api_key.as_str()), ("query", title)])
            .send()
            .await?
            .error_for_status()
            .map_err(|err| AppError::Upstream(err.to_string()))?;

        let body: SearchResponse = resp.json().await?;
        tracing::debug!(query = %title, results = body.results.len(), "catalog search");
        Ok(body.results)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<CandidateMatch>,
}
