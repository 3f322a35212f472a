//! HTTP client for the ExerciseDB API.
//!
//! This module provides a reqwest-based implementation of the
//! [`ExerciseDbApi`] trait.

use crate::{ExerciseDbError, catalog};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

/// Raw response from a fetch: status plus the unparsed body. The body is
/// persisted to the cache whatever the status says.
#[derive(Clone, Debug)]
pub struct FetchedBody {
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait ExerciseDbApi: Send + Sync + 'static {
    /// Fetch the records for a query term from the remote API.
    async fn fetch(&self, term: &str) -> Result<FetchedBody, ExerciseDbError>;
}

/// Client for the ExerciseDB API using reqwest.
#[derive(Clone, Debug)]
pub struct ReqwestExerciseDbClient {
    base_url: String,
    host: String,
    api_key: Option<SecretString>,
    client: reqwest::Client,
}

impl ReqwestExerciseDbClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the API (e.g., "https://exercisedb.p.rapidapi.com")
    /// * `api_key` - The RapidAPI key; requests go out without the key
    ///   header when absent
    pub fn new(base_url: &str, api_key: Option<SecretString>) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("reqwest client build should not fail");
        let base_url = base_url.trim_end_matches('/').to_string();
        let host = base_url
            .split_once("://")
            .map_or(base_url.as_str(), |(_, rest)| rest)
            .to_string();
        Self {
            base_url,
            host,
            api_key,
            client,
        }
    }

    /// Build a GET request carrying the RapidAPI headers.
    fn get_request(&self, url: &str) -> reqwest::RequestBuilder {
        let mut request = self.client.get(url).header("x-rapidapi-host", &self.host);
        if let Some(key) = &self.api_key {
            request = request.header("x-rapidapi-key", key.expose_secret());
        }
        request
    }
}

#[async_trait]
impl ExerciseDbApi for ReqwestExerciseDbClient {
    async fn fetch(&self, term: &str) -> Result<FetchedBody, ExerciseDbError> {
        let url = format!("{}{}", self.base_url, catalog::url_path(term));
        tracing::info!(%term, "connecting to exercise API");
        let resp = self.get_request(&url).send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        Ok(FetchedBody { status, body })
    }
}
