//! PokeAPI Client
//!
//! HTTP client that serves repeated requests from the expiring cache.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::cache::Cache;
use crate::error::{PokedexError, Result};
use crate::models::{LocationArea, LocationAreaPage, Pokemon};

/// Client for the PokeAPI REST endpoints.
///
/// Every successful response body is stored in the shared [`Cache`] keyed by
/// its full URL, and later requests for the same URL are answered from there
/// until the reaper sweeps the entry out.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: Client,
    base_url: String,
    cache: Arc<Cache>,
}

impl PokeApiClient {
    /// Creates a client with its own HTTP connection pool.
    pub fn new(base_url: impl Into<String>, cache: Arc<Cache>, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http, base_url, cache))
    }

    /// Creates a client around an existing `reqwest::Client`.
    pub fn with_client(http: Client, base_url: impl Into<String>, cache: Arc<Cache>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            cache,
        }
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    // == URLs ==
    pub fn location_areas_url(&self) -> String {
        format!("{}/location-area/", self.base_url)
    }

    pub fn location_area_url(&self, name: &str) -> String {
        format!("{}/location-area/{}/", self.base_url, name)
    }

    pub fn pokemon_url(&self, name: &str) -> String {
        format!("{}/pokemon/{}", self.base_url, name)
    }

    // == Fetch ==
    /// Returns the body at `url`, from the cache when possible.
    ///
    /// Only 2xx bodies are cached; any other status is returned as
    /// [`PokedexError::Status`].
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        if let Some(body) = self.cache.get(url) {
            debug!("Cache hit for {}", url);
            return Ok(body);
        }
        debug!("Cache miss for {}, fetching", url);

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PokedexError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await?.to_vec();
        self.cache.add(url, body.clone());
        Ok(body)
    }

    /// Fetches `url` and decodes the body as JSON.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.fetch(url).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    // == Endpoints ==
    /// Fetches a page of location areas; `None` means the first page.
    pub async fn location_areas(&self, page_url: Option<&str>) -> Result<LocationAreaPage> {
        match page_url {
            Some(url) => self.fetch_json(url).await,
            None => self.fetch_json(&self.location_areas_url()).await,
        }
    }

    pub async fn location_area(&self, name: &str) -> Result<LocationArea> {
        self.fetch_json(&self.location_area_url(name)).await
    }

    pub async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        self.fetch_json(&self.pokemon_url(name)).await
    }
}
