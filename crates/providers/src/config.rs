//! Provider configuration structs.
//!
//! Built once at startup (see the API crate's `ServerConfig`) and passed
//! into the clients at construction. Defaults match the hosted services'
//! public endpoints.

/// Default OpenAI-compatible API base URL.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default OpenAI chat model.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";

/// Default Anthropic API base URL.
pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";

/// Default Anthropic chat model.
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-20250514";

/// Default ElevenLabs API base URL.
pub const DEFAULT_ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io";

/// Default ElevenLabs voice used when neither the request nor the project
/// specifies one.
pub const DEFAULT_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";

/// Configuration for an OpenAI-compatible chat provider.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

/// Configuration for the Anthropic chat provider.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

/// Configuration for the ElevenLabs speech provider.
#[derive(Debug, Clone)]
pub struct ElevenLabsConfig {
    pub api_key: String,
    pub base_url: String,
    pub default_voice_id: String,
    /// Filesystem directory audio artifacts are written under.
    pub media_root: std::path::PathBuf,
    /// Web path prefix corresponding to `media_root` in artifact refs.
    pub public_base: String,
}

/// Identifier of a text-generation provider in the precedence list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextProvider {
    OpenAi,
    Anthropic,
}

impl TextProvider {
    pub fn as_str(self) -> &'static str {
        match self {
            TextProvider::OpenAi => "openai",
            TextProvider::Anthropic => "anthropic",
        }
    }
}

/// Parse a comma-separated provider precedence list (e.g.
/// `"openai,anthropic"`). Unknown names are rejected so a typo fails at
/// startup rather than silently changing the routing.
pub fn parse_provider_order(raw: &str) -> Result<Vec<TextProvider>, String> {
    let mut order = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match name {
            "openai" => order.push(TextProvider::OpenAi),
            "anthropic" => order.push(TextProvider::Anthropic),
            other => return Err(format!("Unknown text provider '{other}'")),
        }
    }
    if order.is_empty() {
        return Err("Text provider order must name at least one provider".to_string());
    }
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_default_order() {
        assert_eq!(
            parse_provider_order("openai,anthropic").unwrap(),
            vec![TextProvider::OpenAi, TextProvider::Anthropic]
        );
    }

    #[test]
    fn parses_single_provider_with_whitespace() {
        assert_eq!(
            parse_provider_order(" anthropic ").unwrap(),
            vec![TextProvider::Anthropic]
        );
    }

    #[test]
    fn rejects_unknown_provider() {
        assert!(parse_provider_order("openai,cohere").is_err());
    }

    #[test]
    fn rejects_empty_list() {
        assert!(parse_provider_order("").is_err());
        assert!(parse_provider_order(" , ").is_err());
    }
}
