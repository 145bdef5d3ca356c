//! Browser-side data loading layer
//!
//! This module is the client counterpart of the HTTP surface: a load
//! controller that accumulates paginated breed fetches, de-duplicates
//! in-flight image loads and drives infinite scroll. A UI embedding it feeds
//! scroll geometry in and renders [`controller::BrowserSnapshot`] values out.

pub mod api;
pub mod controller;

pub use api::{BreedApi, HttpBreedApi};
pub use controller::{
    BreedBrowser, BrowserConfig, BrowserSnapshot, LoadPhase, Notice, NoticeKind, ScrollMetrics,
};
