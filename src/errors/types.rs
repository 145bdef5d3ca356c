//! Error type definitions for the breed proxy application
//!
//! This module defines all error types used throughout the application.
//! Each variant maps to exactly one HTTP status code at the web boundary;
//! none of them are retried automatically.

use thiserror::Error;

/// Convenient result alias used throughout the application
pub type AppResult<T> = Result<T, AppError>;

/// Top-level application error type
///
/// This enum represents all possible errors that can occur in the application.
/// It uses `thiserror` to provide automatic error trait implementations and
/// proper error chaining.
#[derive(Error, Debug)]
pub enum AppError {
    /// The upstream dog API was unreachable or signalled failure
    #[error("Upstream error: {message}")]
    Upstream { message: String },

    /// Malformed client input
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// A breed name that does not exist in the current catalog snapshot
    #[error("Unknown breed: {breed}")]
    InvalidBreed { breed: String },

    /// A favorite record already exists for the breed
    #[error("Breed is already in favorites: {breed}")]
    Duplicate { breed: String },

    /// No favorite record exists for the breed
    #[error("Breed not found in favorites: {breed}")]
    NotFound { breed: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Convenience methods for creating common error types
impl AppError {
    /// Create an upstream error with a custom message
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a validation error with a custom message
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an invalid breed error
    pub fn invalid_breed<S: Into<String>>(breed: S) -> Self {
        Self::InvalidBreed {
            breed: breed.into(),
        }
    }

    /// Create a duplicate favorite error
    pub fn duplicate<S: Into<String>>(breed: S) -> Self {
        Self::Duplicate {
            breed: breed.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(breed: S) -> Self {
        Self::NotFound {
            breed: breed.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
