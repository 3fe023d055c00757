//! Anthropic Messages API chat client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use playlet_core::generation::{ChatProvider, ChatRequest, ProviderError};

use crate::config::AnthropicConfig;

/// Default sampling temperature when the request does not set one.
const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Upper bound on generated tokens per reply.
const MAX_TOKENS: u32 = 4096;

/// API version header required by the Messages endpoint.
const API_VERSION: &str = "2023-06-01";

/// Chat client for `POST {base_url}/v1/messages`.
pub struct AnthropicChat {
    client: reqwest::Client,
    config: AnthropicConfig,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct MessagesBody<'a> {
    model: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: Vec<Message<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

impl AnthropicChat {
    pub fn new(config: AnthropicConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl ChatProvider for AnthropicChat {
    async fn complete(&self, request: ChatRequest) -> Result<String, ProviderError> {
        let body = MessagesBody {
            model: &self.config.model,
            system: request.system.as_deref(),
            messages: vec![Message {
                role: "user",
                content: &request.prompt,
            }],
            temperature: request.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.config.base_url))
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ProviderError::Request(format!(
                "Anthropic API error ({status}): {body}"
            )));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::BadResponse(e.to_string()))?;

        parsed
            .content
            .into_iter()
            .find_map(|block| block.text)
            .ok_or_else(|| ProviderError::BadResponse("reply had no text content".to_string()))
    }

    fn name(&self) -> &'static str {
        "anthropic"
    }
}
