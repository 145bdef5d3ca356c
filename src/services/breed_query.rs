//! Deterministic pagination and search over a cached breed snapshot

use crate::models::{BreedPage, BreedQueryParams, Pagination};

/// Stateless engine producing page views over an already-sorted breed list
///
/// `query` is a pure function of its inputs: identical snapshot and
/// parameters always yield an identical page, and the cache is never
/// touched.
#[derive(Debug, Clone, Default)]
pub struct BreedQueryEngine;

impl BreedQueryEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn query(&self, names: &[String], params: &BreedQueryParams) -> BreedPage {
        let page = params.page();
        let limit = params.limit();

        let filtered: Vec<&String> = match params.search() {
            Some(term) => {
                let needle = term.to_lowercase();
                names
                    .iter()
                    .filter(|name| name.to_lowercase().contains(&needle))
                    .collect()
            }
            None => names.iter().collect(),
        };

        let total_breeds = filtered.len() as u64;
        let total_pages = if total_breeds == 0 {
            0
        } else {
            total_breeds.div_ceil(limit as u64) as u32
        };

        let start = (page as usize - 1).saturating_mul(limit as usize);
        let breeds: Vec<String> = filtered
            .into_iter()
            .skip(start)
            .take(limit as usize)
            .cloned()
            .collect();

        BreedPage {
            breeds,
            pagination: Pagination {
                current_page: page,
                total_pages,
                total_breeds,
                limit,
                has_next_page: page < total_pages,
                has_prev_page: page > 1,
            },
        }
    }
}
