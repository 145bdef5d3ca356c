//! Client for the external Dog CEO breed catalog
//!
//! The trait keeps the network boundary mockable; everything above it only
//! sees raw breed maps and image URL lists. Any upstream response that does
//! not signal `"success"`, or that carries a null/absent payload, is a hard
//! fetch failure; callers never observe a silently-empty list.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

use crate::errors::{AppError, AppResult};

/// Response envelope used by every Dog CEO endpoint
#[derive(Debug, Deserialize)]
struct DogApiEnvelope<T> {
    status: String,
    message: Option<T>,
}

/// Raw breed map as served upstream: base breed -> sub-breed names
pub type BreedMap = BTreeMap<String, Vec<String>>;

/// Fetcher for the upstream breed catalog
#[async_trait]
pub trait DogApiClient: Send + Sync {
    /// Fetch the full breed -> sub-breed mapping
    async fn fetch_breed_map(&self) -> AppResult<BreedMap>;

    /// Fetch `count` random image URLs for a breed path (`base` or `base/sub`)
    async fn fetch_breed_images(&self, breed_path: &str, count: u32) -> AppResult<Vec<String>>;

    /// Fetch a single random image URL for a breed path
    async fn fetch_random_breed_image(&self, breed_path: &str) -> AppResult<String>;
}

/// reqwest-backed implementation of [`DogApiClient`]
pub struct HttpDogApiClient {
    client: Client,
    base_url: String,
}

impl HttpDogApiClient {
    /// Create a new client with a connection timeout only, so slow image
    /// payloads are not cut off mid-transfer.
    pub fn new(base_url: &str, connect_timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| AppError::internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_payload<T: DeserializeOwned>(&self, url: &str, what: &str) -> AppResult<T> {
        debug!("Fetching {what} from {url}");

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(AppError::upstream(format!(
                "HTTP {} fetching {what}",
                response.status()
            )));
        }

        let envelope: DogApiEnvelope<T> = response
            .json()
            .await
            .map_err(|e| AppError::upstream(format!("malformed {what} response: {e}")))?;

        if envelope.status != "success" {
            return Err(AppError::upstream(format!(
                "upstream returned status '{}' for {what}",
                envelope.status
            )));
        }

        envelope
            .message
            .ok_or_else(|| AppError::upstream(format!("{what} response had no payload")))
    }
}

#[async_trait]
impl DogApiClient for HttpDogApiClient {
    async fn fetch_breed_map(&self) -> AppResult<BreedMap> {
        let url = format!("{}/breeds/list/all", self.base_url);
        self.fetch_payload(&url, "breed list").await
    }

    async fn fetch_breed_images(&self, breed_path: &str, count: u32) -> AppResult<Vec<String>> {
        let url = format!(
            "{}/breed/{breed_path}/images/random/{count}",
            self.base_url
        );
        self.fetch_payload(&url, "breed images").await
    }

    async fn fetch_random_breed_image(&self, breed_path: &str) -> AppResult<String> {
        let url = format!("{}/breed/{breed_path}/images/random", self.base_url);
        self.fetch_payload(&url, "breed image").await
    }
}
