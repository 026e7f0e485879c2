//! Application configuration

use crate::arango::ArangoConfig;
use crate::llm::{LlmConfig, LlmProvider};
use anyhow::{bail, Result};
use std::env;

/// Q&A model used when none is configured.
pub const DEFAULT_QA_MODEL: &str = "qwen-2.5-32b";
/// Code-generation model used when none is configured.
pub const DEFAULT_CODER_MODEL: &str = "qwen-2.5-coder-32b";

/// Everything the process needs, assembled once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// ArangoDB connection
    pub arango: ArangoConfig,
    /// Model answering questions (AQL synthesis + summarization)
    pub qa_llm: LlmConfig,
    /// Model generating plotting code
    pub coder_llm: LlmConfig,
    /// Interpreter for generated plotting code
    pub python_bin: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http_port: 5000,
            arango: ArangoConfig::default(),
            qa_llm: LlmConfig {
                provider: LlmProvider::Groq,
                model: DEFAULT_QA_MODEL.to_string(),
                api_key: None,
                api_base_url: None,
            },
            coder_llm: LlmConfig {
                provider: LlmProvider::Groq,
                model: DEFAULT_CODER_MODEL.to_string(),
                api_key: None,
                api_base_url: None,
            },
            python_bin: "python3".to_string(),
        }
    }
}

impl AppConfig {
    /// Build the configuration from the environment. `GROQ_API_KEY` is the
    /// one required credential; everything else falls back to the local
    /// defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        let api_key = match env::var("GROQ_API_KEY") {
            Ok(key) if !key.is_empty() => key,
            _ => bail!("GROQ_API_KEY is not set in environment variables"),
        };
        config.qa_llm.api_key = Some(api_key.clone());
        config.coder_llm.api_key = Some(api_key);

        if let Ok(model) = env::var("GRAPHTALK_QA_MODEL") {
            config.qa_llm.model = model;
        }
        if let Ok(model) = env::var("GRAPHTALK_CODER_MODEL") {
            config.coder_llm.model = model;
        }

        if let Ok(url) = env::var("ARANGO_URL") {
            config.arango.url = url;
        }
        if let Ok(database) = env::var("ARANGO_DB") {
            config.arango.database = database;
        }
        if let Ok(username) = env::var("ARANGO_USER") {
            config.arango.username = username;
        }
        if let Ok(password) = env::var("ARANGO_PASSWORD") {
            config.arango.password = password;
        }

        if let Ok(port) = env::var("HTTP_PORT") {
            match port.parse() {
                Ok(port) => config.http_port = port,
                Err(_) => bail!("HTTP_PORT is not a valid port number: {port}"),
            }
        }

        if let Ok(python_bin) = env::var("PYTHON_BIN") {
            config.python_bin = python_bin;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.http_port, 5000);
        assert_eq!(config.arango.url, "http://localhost:8529");
        assert_eq!(config.qa_llm.model, DEFAULT_QA_MODEL);
        assert_eq!(config.coder_llm.model, DEFAULT_CODER_MODEL);
        assert_eq!(config.qa_llm.provider, LlmProvider::Groq);
        assert_eq!(config.python_bin, "python3");
    }

    // The env is process-global, so all mutation lives in this one test; the
    // other tests in this binary never read it.
    #[test]
    fn test_from_env_requires_api_key_and_honors_overrides() {
        env::remove_var("GROQ_API_KEY");
        assert!(AppConfig::from_env().is_err());

        env::set_var("GROQ_API_KEY", "test-key");
        env::set_var("GRAPHTALK_QA_MODEL", "llama-3.3-70b");
        env::set_var("GRAPHTALK_CODER_MODEL", "llama-coder");
        env::set_var("ARANGO_URL", "http://db.internal:8530");
        env::set_var("ARANGO_DB", "shop");
        env::set_var("ARANGO_USER", "reader");
        env::set_var("ARANGO_PASSWORD", "secret");
        env::set_var("HTTP_PORT", "8080");
        env::set_var("PYTHON_BIN", "/usr/local/bin/python3");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.qa_llm.api_key.as_deref(), Some("test-key"));
        assert_eq!(config.coder_llm.api_key.as_deref(), Some("test-key"));
        assert_eq!(config.qa_llm.model, "llama-3.3-70b");
        assert_eq!(config.coder_llm.model, "llama-coder");
        assert_eq!(config.arango.url, "http://db.internal:8530");
        assert_eq!(config.arango.database, "shop");
        assert_eq!(config.arango.username, "reader");
        assert_eq!(config.arango.password, "secret");
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.python_bin, "/usr/local/bin/python3");

        env::set_var("HTTP_PORT", "not-a-port");
        assert!(AppConfig::from_env().is_err());

        for var in [
            "GROQ_API_KEY",
            "GRAPHTALK_QA_MODEL",
            "GRAPHTALK_CODER_MODEL",
            "ARANGO_URL",
            "ARANGO_DB",
            "ARANGO_USER",
            "ARANGO_PASSWORD",
            "HTTP_PORT",
            "PYTHON_BIN",
        ] {
            env::remove_var(var);
        }
    }
}
