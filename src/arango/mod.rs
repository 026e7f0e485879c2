//! ArangoDB access over its HTTP API.
//!
//! The application talks to a single database through [`ArangoClient`]: AQL
//! execution via the cursor endpoint, plus a sampled schema summary that the
//! Q&A chain feeds to the LLM in place of hand-written schema documentation.

pub mod client;

pub use client::ArangoClient;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArangoError {
    #[error("Failed to connect to ArangoDB: {0}")]
    ConnectionError(String),
    #[error("ArangoDB API error: {0}")]
    ApiError(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type ArangoResult<T> = Result<T, ArangoError>;

/// Connection settings for one ArangoDB database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArangoConfig {
    /// Server endpoint
    pub url: String,
    /// Database name
    pub database: String,
    /// Username
    pub username: String,
    /// Password
    pub password: String,
}

impl Default for ArangoConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8529".to_string(),
            database: "_system".to_string(),
            username: "root".to_string(),
            password: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_targets_local_system_db() {
        let config = ArangoConfig::default();
        assert_eq!(config.url, "http://localhost:8529");
        assert_eq!(config.database, "_system");
        assert_eq!(config.username, "root");
        assert!(config.password.is_empty());
    }
}
