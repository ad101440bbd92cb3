use super::{ChatMessage, LLM, LLMConfig, LLMProvider, LLMResponse};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const OPENAI_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Provider speaking the OpenAI chat-completions wire format.
///
/// Serves both the hosted OpenAI API and OpenAI-compatible local servers
/// such as LMStudio, which differ only in endpoint and authentication.
pub struct ChatCompletionsProvider {
    config: LLMConfig,
    client: reqwest::Client,
    endpoint: String,
    provider: LLMProvider,
}

#[derive(Debug, Serialize)]
struct ChatCompletionsRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    choices: Vec<ChatCompletionsChoice>,
    usage: Option<ChatCompletionsUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionsChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionsUsage {
    total_tokens: u32,
}

impl ChatCompletionsProvider {
    /// Hosted OpenAI API; requires an API key
    pub fn openai(config: LLMConfig) -> Result<Self> {
        if config.api_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
            return Err(anyhow!("OpenAI API key required"));
        }

        let endpoint = config
            .endpoint
            .clone()
            .unwrap_or_else(|| OPENAI_ENDPOINT.to_string());

        Self::build(config, endpoint, LLMProvider::OpenAI)
    }

    /// Local OpenAI-compatible server; requires an endpoint
    pub fn lm_studio(config: LLMConfig) -> Result<Self> {
        let endpoint = config
            .endpoint
            .clone()
            .ok_or_else(|| anyhow!("LMStudio endpoint not configured"))?;

        Self::build(config, endpoint, LLMProvider::LMStudio)
    }

    fn build(config: LLMConfig, endpoint: String, provider: LLMProvider) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            config,
            client,
            endpoint,
            provider,
        })
    }

    fn parse_response(body: ChatCompletionsResponse) -> Result<LLMResponse> {
        let content = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("No choices in chat completion response"))?
            .message
            .content;

        Ok(LLMResponse {
            content,
            tokens_used: body.usage.map(|u| u.total_tokens),
        })
    }
}

#[async_trait]
impl LLM for ChatCompletionsProvider {
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<LLMResponse> {
        let request = ChatCompletionsRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        debug!("Sending request to {:?} at {}", self.provider, self.endpoint);

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(api_key) = &self.config.api_key {
            builder = builder.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = builder.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow!("{:?} API error {}: {}", self.provider, status, text));
        }

        let body: ChatCompletionsResponse = response.json().await?;
        Self::parse_response(body)
    }

    fn provider_type(&self) -> LLMProvider {
        self.provider.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_requires_api_key() {
        assert!(ChatCompletionsProvider::openai(LLMConfig::default()).is_err());

        let config = LLMConfig {
            api_key: Some("sk-test".to_string()),
            ..LLMConfig::default()
        };
        let provider = ChatCompletionsProvider::openai(config).unwrap();
        assert_eq!(provider.provider_type(), LLMProvider::OpenAI);
        assert_eq!(provider.endpoint, OPENAI_ENDPOINT);
    }

    #[test]
    fn test_lm_studio_requires_endpoint() {
        let config = LLMConfig {
            provider: LLMProvider::LMStudio,
            ..LLMConfig::default()
        };
        assert!(ChatCompletionsProvider::lm_studio(config.clone()).is_err());

        let config = LLMConfig {
            endpoint: Some("http://localhost:1234/v1/chat/completions".to_string()),
            ..config
        };
        let provider = ChatCompletionsProvider::lm_studio(config).unwrap();
        assert_eq!(provider.provider_type(), LLMProvider::LMStudio);
    }

    #[test]
    fn test_request_serialization() {
        let request = ChatCompletionsRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![ChatMessage::system("be brief"), ChatMessage::user("hi")],
            max_tokens: 800,
            temperature: 0.7,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["max_tokens"], 800);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
    }

    #[test]
    fn test_parse_response() {
        let body: ChatCompletionsResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"Neo"}}],"usage":{"total_tokens":42}}"#,
        )
        .unwrap();

        let response = ChatCompletionsProvider::parse_response(body).unwrap();
        assert_eq!(response.content, "Neo");
        assert_eq!(response.tokens_used, Some(42));
    }

    #[test]
    fn test_parse_response_without_choices() {
        let body: ChatCompletionsResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(ChatCompletionsProvider::parse_response(body).is_err());
    }
}
