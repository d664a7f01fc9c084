//! Error types for the Pokedex
//!
//! Provides unified error handling using thiserror.

use reqwest::StatusCode;
use thiserror::Error;

// == Pokedex Error Enum ==
/// Unified error type for the crate.
///
/// Cache lookups and inserts never fail; these variants cover validated
/// construction and the REPL shell around the cache.
#[derive(Error, Debug)]
pub enum PokedexError {
    /// Configuration rejected during validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// HTTP request could not be completed
    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("API request to {url} returned {status}")]
    Status { url: String, status: StatusCode },

    /// Response body was not the expected JSON
    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A command was invoked without a required argument
    #[error("Please provide {0}")]
    MissingArgument(&'static str),

    /// Console input/output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, PokedexError>;
