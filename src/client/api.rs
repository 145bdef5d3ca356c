//! HTTP API client used by the load controller

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::errors::{AppError, AppResult};
use crate::models::{AddFavoriteRequest, BreedPage, FavoriteRecord};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client-side view of the breed proxy HTTP surface
#[async_trait]
pub trait BreedApi: Send + Sync {
    async fn list_breeds(
        &self,
        page: u32,
        limit: u32,
        search: Option<&str>,
    ) -> AppResult<BreedPage>;

    /// Image URLs for one breed (server-side default batch size)
    async fn breed_images(&self, breed: &str) -> AppResult<Vec<String>>;

    async fn favorites(&self) -> AppResult<Vec<FavoriteRecord>>;

    async fn add_favorite(&self, breed: &str) -> AppResult<()>;

    async fn remove_favorite(&self, breed: &str) -> AppResult<()>;
}

/// reqwest-backed implementation of [`BreedApi`]
pub struct HttpBreedApi {
    client: Client,
    base_url: String,
}

impl HttpBreedApi {
    pub fn new(base_url: &str) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Translate a non-success favorites response into the error taxonomy
    fn favorite_error(status: StatusCode, breed: &str) -> AppError {
        match status {
            StatusCode::CONFLICT => AppError::duplicate(breed),
            StatusCode::NOT_FOUND => AppError::not_found(breed),
            StatusCode::BAD_REQUEST => {
                AppError::validation("Breed is required and must be a string")
            }
            _ => AppError::upstream(format!("HTTP {status} updating favorites")),
        }
    }
}

#[async_trait]
impl BreedApi for HttpBreedApi {
    async fn list_breeds(
        &self,
        page: u32,
        limit: u32,
        search: Option<&str>,
    ) -> AppResult<BreedPage> {
        let mut query: Vec<(&str, String)> = vec![
            ("page", page.to_string()),
            ("limit", limit.to_string()),
        ];
        if let Some(term) = search {
            query.push(("search", term.to_string()));
        }

        let response = self
            .client
            .get(format!("{}/breeds", self.base_url))
            .query(&query)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::upstream(format!(
                "HTTP {} listing breeds",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }

    async fn breed_images(&self, breed: &str) -> AppResult<Vec<String>> {
        let response = self
            .client
            .get(format!("{}/breeds/{breed}/images", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::upstream(format!(
                "HTTP {} fetching images for '{breed}'",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }

    async fn favorites(&self) -> AppResult<Vec<FavoriteRecord>> {
        let response = self
            .client
            .get(format!("{}/favorites", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::upstream(format!(
                "HTTP {} listing favorites",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }

    async fn add_favorite(&self, breed: &str) -> AppResult<()> {
        let response = self
            .client
            .post(format!("{}/favorites", self.base_url))
            .json(&AddFavoriteRequest {
                breed: Some(breed.to_string()),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::favorite_error(response.status(), breed));
        }
        Ok(())
    }

    async fn remove_favorite(&self, breed: &str) -> AppResult<()> {
        let response = self
            .client
            .delete(format!("{}/favorites/{breed}", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::favorite_error(response.status(), breed));
        }
        Ok(())
    }
}
