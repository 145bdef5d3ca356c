use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single favorited breed
///
/// Favorites are volatile: they live for the process lifetime only and are
/// never persisted. At most one record exists per breed name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavoriteRecord {
    pub breed: String,
    #[serde(rename = "addedAt")]
    pub added_at: DateTime<Utc>,
}

/// Pagination metadata returned alongside a page of breed names
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_breeds: u64,
    pub limit: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

/// One page of the (optionally filtered) breed listing
///
/// Derived per request from the cached snapshot, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BreedPage {
    pub breeds: Vec<String>,
    pub pagination: Pagination,
}

/// Raw query parameters for the breed listing endpoint
///
/// Values are carried as strings so that unparsable input silently falls
/// back to the documented defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BreedQueryParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
}

impl BreedQueryParams {
    /// Effective page number: absent, unparsable or non-positive input
    /// falls back to 1.
    pub fn page(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|p| *p > 0)
            .unwrap_or(1)
    }

    /// Effective page size: absent, unparsable or non-positive input falls
    /// back to 30.
    pub fn limit(&self) -> u32 {
        self.limit
            .as_deref()
            .and_then(|l| l.trim().parse::<u32>().ok())
            .filter(|l| *l > 0)
            .unwrap_or(30)
    }

    /// Search term, with blank input treated as no filter
    pub fn search(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Raw query parameters for the breed images endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageQueryParams {
    pub count: Option<String>,
}

impl ImageQueryParams {
    /// Advisory image count: absent, unparsable or non-positive input falls
    /// back to 3.
    pub fn count(&self) -> u32 {
        self.count
            .as_deref()
            .and_then(|c| c.trim().parse::<u32>().ok())
            .filter(|c| *c > 0)
            .unwrap_or(3)
    }
}

/// Request body for adding a favorite
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddFavoriteRequest {
    pub breed: Option<String>,
}
