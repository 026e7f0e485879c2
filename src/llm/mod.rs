//! Chat-completion clients for hosted LLM providers.
//!
//! Both delegate chains go through [`ChatClient`]: the Q&A chain for AQL
//! synthesis and result summarization, the visualization chain for code
//! generation.

pub mod client;

pub use client::ChatClient;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("LLM API error: {0}")]
    ApiError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type LlmResult<T> = Result<T, LlmError>;

/// LLM Provider options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum LlmProvider {
    Groq,
    OpenAI,
    Ollama,
    /// Returns a canned reply without touching the network. Test-only provider.
    Mock,
}

/// Configuration for one chat model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// The LLM provider to use
    pub provider: LlmProvider,
    /// Model name (e.g., "qwen-2.5-32b")
    pub model: String,
    /// API Key (required for hosted providers)
    pub api_key: Option<String>,
    /// API Base URL (required for self-hosted, optional for others)
    pub api_base_url: Option<String>,
}
