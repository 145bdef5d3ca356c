//! Error types for the breed proxy application

pub mod types;

pub use types::{AppError, AppResult};
