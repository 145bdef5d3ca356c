//! Service layer for business logic
//!
//! Services are constructed explicitly at process start and injected where
//! they are needed; there is no ambient global state. The breed cache is the
//! single source of catalog truth: favorites validation reads it instead of
//! keeping a second copy of the breed list.

pub mod breed_cache;
pub mod breed_query;
pub mod favorites;

pub use breed_cache::BreedCacheService;
pub use breed_query::BreedQueryEngine;
pub use favorites::FavoritesService;
