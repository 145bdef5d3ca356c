//! Time-boxed cache over the upstream breed catalog
//!
//! Shields the query engine and favorites validation from upstream latency
//! and transient failures. Expiry is lazy: entries carry their deadline and
//! are compared against `Instant::now()` on read, so there are no timers to
//! leak or to mock in tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

use crate::errors::AppResult;
use crate::upstream::{BreedMap, DogApiClient};

const DEFAULT_IMAGE_COUNT: u32 = 3;

/// Cached breed list snapshot, replaced wholesale on refresh
struct BreedListEntry {
    names: Arc<Vec<String>>,
    fetched_at: Instant,
}

/// Cached image URL list for one breed; entries expire independently
struct ImageEntry {
    urls: Vec<String>,
    expires_at: Instant,
}

/// TTL cache for the upstream breed list and per-breed image lists
///
/// Concurrent misses may fetch from upstream more than once; every writer
/// installs a complete entry under a short write lock, so readers never
/// observe partial state.
#[derive(Clone)]
pub struct BreedCacheService {
    upstream: Arc<dyn DogApiClient>,
    ttl: Duration,
    breeds: Arc<RwLock<Option<BreedListEntry>>>,
    images: Arc<RwLock<HashMap<String, ImageEntry>>>,
}

impl BreedCacheService {
    pub fn new(upstream: Arc<dyn DogApiClient>, ttl: Duration) -> Self {
        Self {
            upstream,
            ttl,
            breeds: Arc::new(RwLock::new(None)),
            images: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Return the flattened, sorted breed name list, refreshing from
    /// upstream when the cached snapshot has passed its TTL.
    pub async fn breed_names(&self) -> AppResult<Arc<Vec<String>>> {
        {
            let guard = self.breeds.read().await;
            if let Some(entry) = guard.as_ref() {
                if entry.fetched_at.elapsed() < self.ttl {
                    debug!("Returning breed list from cache");
                    return Ok(Arc::clone(&entry.names));
                }
            }
        }

        // Fetch outside the lock; the write below replaces the whole entry.
        let breed_map = self.upstream.fetch_breed_map().await?;
        let names = Arc::new(flatten_breed_map(&breed_map));
        debug!("Refreshed breed list: {} names", names.len());

        let mut guard = self.breeds.write().await;
        *guard = Some(BreedListEntry {
            names: Arc::clone(&names),
            fetched_at: Instant::now(),
        });

        Ok(names)
    }

    /// Return cached image URLs for a breed, fetching on miss or expiry.
    ///
    /// `count` is advisory and passed through to upstream; zero falls back
    /// to the default of 3. A `base-sub` name is translated to the
    /// upstream's `base/sub` path form.
    pub async fn breed_images(&self, breed: &str, count: u32) -> AppResult<Vec<String>> {
        let count = if count == 0 { DEFAULT_IMAGE_COUNT } else { count };

        {
            let guard = self.images.read().await;
            if let Some(entry) = guard.get(breed) {
                if Instant::now() < entry.expires_at {
                    debug!("Returning images for breed '{breed}' from cache");
                    return Ok(entry.urls.clone());
                }
            }
        }

        let path = breed_path(breed);
        let urls = self.upstream.fetch_breed_images(&path, count).await?;
        debug!("Fetched {} images for breed '{breed}'", urls.len());

        let mut guard = self.images.write().await;
        guard.insert(
            breed.to_string(),
            ImageEntry {
                urls: urls.clone(),
                expires_at: Instant::now() + self.ttl,
            },
        );

        Ok(urls)
    }
}

/// Flatten the upstream `base -> [sub...]` map into sorted breed names
///
/// A breed without sub-breeds yields just `base`; one with sub-breeds
/// yields every `base-sub` combination plus the bare `base` itself.
fn flatten_breed_map(map: &BreedMap) -> Vec<String> {
    let mut names = Vec::with_capacity(map.len());
    for (breed, sub_breeds) in map {
        if sub_breeds.is_empty() {
            names.push(breed.clone());
        } else {
            for sub in sub_breeds {
                names.push(format!("{breed}-{sub}"));
            }
            names.push(breed.clone());
        }
    }
    names.sort();
    names
}

/// Translate a flattened breed name into its upstream path segment.
/// Only the first `-` separates base from sub-breed.
fn breed_path(breed: &str) -> String {
    breed.replacen('-', "/", 1)
}
