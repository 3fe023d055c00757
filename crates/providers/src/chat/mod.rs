//! Chat-completion providers and the precedence router.
//!
//! The router owns an ordered list of constructed providers and always
//! dispatches to the first one. The order is fixed at construction from
//! configuration, so provider choice is deterministic and testable
//! without touching the environment.

pub mod anthropic;
pub mod openai;

use std::sync::Arc;

use async_trait::async_trait;

use playlet_core::generation::{ChatProvider, ChatRequest, ProviderError};

use crate::config::{AnthropicConfig, OpenAiConfig, TextProvider};

pub use anthropic::AnthropicChat;
pub use openai::OpenAiChat;

/// Routes chat requests to the highest-precedence configured provider.
pub struct ChatRouter {
    providers: Vec<Arc<dyn ChatProvider>>,
}

impl ChatRouter {
    /// Build a router from an explicit, already-ordered provider list.
    ///
    /// Fails when the list is empty: a router that can never dispatch is
    /// a configuration error, not a runtime condition.
    pub fn new(providers: Vec<Arc<dyn ChatProvider>>) -> Result<Self, ProviderError> {
        if providers.is_empty() {
            return Err(ProviderError::NotConfigured(
                "no text-generation provider configured".to_string(),
            ));
        }
        Ok(Self { providers })
    }

    /// Build a router from configuration: walk the precedence list and
    /// construct each provider whose config is present.
    pub fn from_config(
        order: &[TextProvider],
        openai: Option<&OpenAiConfig>,
        anthropic: Option<&AnthropicConfig>,
    ) -> Result<Self, ProviderError> {
        let mut providers: Vec<Arc<dyn ChatProvider>> = Vec::new();
        for provider in order {
            match provider {
                TextProvider::OpenAi => {
                    if let Some(config) = openai {
                        providers.push(Arc::new(OpenAiChat::new(config.clone())));
                    }
                }
                TextProvider::Anthropic => {
                    if let Some(config) = anthropic {
                        providers.push(Arc::new(AnthropicChat::new(config.clone())));
                    }
                }
            }
        }
        Self::new(providers)
    }

    /// Name of the provider requests are dispatched to.
    pub fn primary_name(&self) -> &'static str {
        self.providers[0].name()
    }

    /// Names of all configured providers in precedence order.
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }
}

#[async_trait]
impl ChatProvider for ChatRouter {
    async fn complete(&self, request: ChatRequest) -> Result<String, ProviderError> {
        let primary = &self.providers[0];
        tracing::debug!(provider = primary.name(), "Dispatching chat request");
        primary.complete(request).await
    }

    fn name(&self) -> &'static str {
        self.primary_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        DEFAULT_ANTHROPIC_BASE_URL, DEFAULT_ANTHROPIC_MODEL, DEFAULT_OPENAI_BASE_URL,
        DEFAULT_OPENAI_MODEL,
    };

    fn openai_config() -> OpenAiConfig {
        OpenAiConfig {
            api_key: "sk-test".to_string(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_OPENAI_MODEL.to_string(),
        }
    }

    fn anthropic_config() -> AnthropicConfig {
        AnthropicConfig {
            api_key: "ak-test".to_string(),
            base_url: DEFAULT_ANTHROPIC_BASE_URL.to_string(),
            model: DEFAULT_ANTHROPIC_MODEL.to_string(),
        }
    }

    #[test]
    fn first_configured_provider_wins() {
        let router = ChatRouter::from_config(
            &[TextProvider::OpenAi, TextProvider::Anthropic],
            Some(&openai_config()),
            Some(&anthropic_config()),
        )
        .unwrap();
        assert_eq!(router.primary_name(), "openai");
        assert_eq!(router.provider_names(), vec!["openai", "anthropic"]);
    }

    #[test]
    fn precedence_order_is_respected() {
        let router = ChatRouter::from_config(
            &[TextProvider::Anthropic, TextProvider::OpenAi],
            Some(&openai_config()),
            Some(&anthropic_config()),
        )
        .unwrap();
        assert_eq!(router.primary_name(), "anthropic");
    }

    #[test]
    fn unconfigured_entries_are_skipped() {
        let router = ChatRouter::from_config(
            &[TextProvider::OpenAi, TextProvider::Anthropic],
            None,
            Some(&anthropic_config()),
        )
        .unwrap();
        assert_eq!(router.primary_name(), "anthropic");
    }

    #[test]
    fn empty_config_fails_construction() {
        let result = ChatRouter::from_config(
            &[TextProvider::OpenAi, TextProvider::Anthropic],
            None,
            None,
        );
        assert!(result.is_err());
    }

    struct FixedChat(&'static str);

    #[async_trait]
    impl ChatProvider for FixedChat {
        async fn complete(&self, _request: ChatRequest) -> Result<String, ProviderError> {
            Ok(self.0.to_string())
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    #[tokio::test]
    async fn requests_go_to_the_first_provider_only() {
        let router =
            ChatRouter::new(vec![Arc::new(FixedChat("alpha")), Arc::new(FixedChat("beta"))])
                .unwrap();
        let reply = router
            .complete(ChatRequest {
                system: None,
                prompt: "hello".to_string(),
                temperature: None,
            })
            .await
            .unwrap();
        assert_eq!(reply, "alpha");
    }
}
