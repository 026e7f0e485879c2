//! Chat client for LLM interactions

use crate::llm::{LlmConfig, LlmError, LlmProvider, LlmResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Reply the [`LlmProvider::Mock`] provider hands back, regardless of prompt.
pub const MOCK_REPLY: &str = "FOR doc IN items LIMIT 10 RETURN doc";

#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    config: LlmConfig,
    api_base_url: String,
}

impl ChatClient {
    pub fn new(config: &LlmConfig) -> LlmResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| LlmError::ConfigError(e.to_string()))?;

        let api_base_url = config.api_base_url.clone().unwrap_or_else(|| {
            match config.provider {
                LlmProvider::Groq => "https://api.groq.com/openai/v1".to_string(),
                LlmProvider::OpenAI => "https://api.openai.com/v1".to_string(),
                LlmProvider::Ollama => "http://localhost:11434".to_string(),
                LlmProvider::Mock => String::new(),
            }
        });

        if config.api_key.is_none()
            && matches!(config.provider, LlmProvider::Groq | LlmProvider::OpenAI)
        {
            return Err(LlmError::ConfigError(format!(
                "{:?} requires an API key",
                config.provider
            )));
        }

        Ok(Self {
            client,
            config: config.clone(),
            api_base_url,
        })
    }

    /// One chat completion at temperature 0. Returns the assistant message
    /// content verbatim.
    pub async fn chat(&self, system: &str, user: &str) -> LlmResult<String> {
        match self.config.provider {
            LlmProvider::Groq | LlmProvider::OpenAI => self.openai_chat(system, user).await,
            LlmProvider::Ollama => self.ollama_chat(system, user).await,
            LlmProvider::Mock => Ok(MOCK_REPLY.to_string()),
        }
    }

    async fn openai_chat(&self, system: &str, user: &str) -> LlmResult<String> {
        #[derive(Serialize)]
        struct Message {
            role: String,
            content: String,
        }

        #[derive(Serialize)]
        struct Request<'a> {
            model: &'a str,
            messages: Vec<Message>,
            temperature: f32,
        }

        #[derive(Deserialize)]
        struct Response {
            choices: Vec<Choice>,
        }

        #[derive(Deserialize)]
        struct Choice {
            message: MessageContent,
        }

        #[derive(Deserialize)]
        struct MessageContent {
            content: String,
        }

        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| LlmError::ConfigError("missing API key".to_string()))?;

        let url = format!("{}/chat/completions", self.api_base_url);
        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&Request {
                model: &self.config.model,
                messages: vec![
                    Message {
                        role: "system".to_string(),
                        content: system.to_string(),
                    },
                    Message {
                        role: "user".to_string(),
                        content: user.to_string(),
                    },
                ],
                temperature: 0.0,
            })
            .send()
            .await
            .map_err(|e| LlmError::NetworkError(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_default();
            return Err(LlmError::ApiError(format!(
                "chat completion returned {}: {}",
                status, error_text
            )));
        }

        let result: Response = resp
            .json()
            .await
            .map_err(|e| LlmError::SerializationError(e.to_string()))?;
        Ok(result
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .unwrap_or_default())
    }

    async fn ollama_chat(&self, system: &str, user: &str) -> LlmResult<String> {
        #[derive(Serialize)]
        struct Request<'a> {
            model: &'a str,
            prompt: &'a str,
            system: &'a str,
            stream: bool,
        }

        #[derive(Deserialize)]
        struct Response {
            response: String,
        }

        let url = format!("{}/api/generate", self.api_base_url);
        let resp = self
            .client
            .post(&url)
            .json(&Request {
                model: &self.config.model,
                prompt: user,
                system,
                stream: false,
            })
            .send()
            .await
            .map_err(|e| LlmError::NetworkError(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(LlmError::ApiError(format!(
                "Ollama error: {}",
                resp.status()
            )));
        }

        let result: Response = resp
            .json()
            .await
            .map_err(|e| LlmError::SerializationError(e.to_string()))?;
        Ok(result.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_config() -> LlmConfig {
        LlmConfig {
            provider: LlmProvider::Mock,
            model: "mock".to_string(),
            api_key: None,
            api_base_url: None,
        }
    }

    #[tokio::test]
    async fn test_mock_chat() {
        let client = ChatClient::new(&mock_config()).unwrap();
        let reply = client.chat("system", "user").await.unwrap();
        assert_eq!(reply, MOCK_REPLY);
    }

    #[test]
    fn test_hosted_provider_requires_api_key() {
        let config = LlmConfig {
            provider: LlmProvider::Groq,
            model: "qwen-2.5-32b".to_string(),
            api_key: None,
            api_base_url: None,
        };
        assert!(ChatClient::new(&config).is_err());
    }

    #[test]
    fn test_ollama_needs_no_api_key() {
        let config = LlmConfig {
            provider: LlmProvider::Ollama,
            model: "llama3".to_string(),
            api_key: None,
            api_base_url: None,
        };
        assert!(ChatClient::new(&config).is_ok());
    }
}
