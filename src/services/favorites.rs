//! Volatile favorites store
//!
//! Favorites live for the process lifetime only; there is no persistence.
//! Breed names are validated against the breed cache, which stays the single
//! source of catalog truth. Uniqueness is enforced by name equality.

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::errors::{AppError, AppResult};
use crate::models::FavoriteRecord;
use crate::services::BreedCacheService;

#[derive(Clone)]
pub struct FavoritesService {
    catalog: BreedCacheService,
    records: Arc<RwLock<Vec<FavoriteRecord>>>,
}

impl FavoritesService {
    pub fn new(catalog: BreedCacheService) -> Self {
        Self {
            catalog,
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Add a breed to the favorites, validating it against the catalog
    pub async fn add(&self, breed: &str) -> AppResult<FavoriteRecord> {
        let breed = breed.trim();
        if breed.is_empty() {
            return Err(AppError::validation("Breed is required and must be a string"));
        }

        let names = self.catalog.breed_names().await?;
        if !names.iter().any(|name| name == breed) {
            return Err(AppError::invalid_breed(breed));
        }

        // Duplicate check and insert happen under one write lock
        let mut records = self.records.write().await;
        if records.iter().any(|record| record.breed == breed) {
            return Err(AppError::duplicate(breed));
        }

        let record = FavoriteRecord {
            breed: breed.to_string(),
            added_at: Utc::now(),
        };
        records.push(record.clone());
        debug!("Added favorite '{breed}' ({} total)", records.len());

        Ok(record)
    }

    /// Remove a breed from the favorites, returning the removed record
    pub async fn remove(&self, breed: &str) -> AppResult<FavoriteRecord> {
        let breed = breed.trim();
        if breed.is_empty() {
            return Err(AppError::validation("Breed parameter is required"));
        }

        let mut records = self.records.write().await;
        let position = records
            .iter()
            .position(|record| record.breed == breed)
            .ok_or_else(|| AppError::not_found(breed))?;

        let record = records.remove(position);
        debug!("Removed favorite '{breed}' ({} left)", records.len());

        Ok(record)
    }

    /// Snapshot of all favorite records in insertion order
    pub async fn list(&self) -> Vec<FavoriteRecord> {
        self.records.read().await.clone()
    }
}
