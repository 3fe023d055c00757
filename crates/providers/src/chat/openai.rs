//! OpenAI-compatible chat completion client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use playlet_core::generation::{ChatProvider, ChatRequest, ProviderError};

use crate::config::OpenAiConfig;

/// Default sampling temperature when the request does not set one.
const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Chat client for any endpoint speaking the OpenAI chat-completions
/// protocol (`POST {base_url}/chat/completions`).
pub struct OpenAiChat {
    client: reqwest::Client,
    config: OpenAiConfig,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiChat {
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl ChatProvider for OpenAiChat {
    async fn complete(&self, request: ChatRequest) -> Result<String, ProviderError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system.as_deref() {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: &request.prompt,
        });

        let body = CompletionBody {
            model: &self.config.model,
            messages,
            temperature: request.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
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
                "OpenAI API error ({status}): {body}"
            )));
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::BadResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ProviderError::BadResponse("completion had no choices".to_string()))
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}
