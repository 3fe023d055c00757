use std::time::Duration;

use playlet_comfyui::ComfyUiConfig;
use playlet_providers::config::{
    parse_provider_order, AnthropicConfig, ElevenLabsConfig, OpenAiConfig, TextProvider,
    DEFAULT_ANTHROPIC_BASE_URL, DEFAULT_ANTHROPIC_MODEL, DEFAULT_ELEVENLABS_BASE_URL,
    DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL, DEFAULT_VOICE_ID,
};

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables. Provider configs
/// are assembled here once and handed to the clients at construction;
/// nothing else in the codebase reads the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// External provider configuration.
    pub providers: ProviderSettings,
}

/// Configuration for the external generation providers.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    /// Text-generation precedence: the first configured entry handles all
    /// chat requests.
    pub text_order: Vec<TextProvider>,
    /// Present iff `OPENAI_API_KEY` is set.
    pub openai: Option<OpenAiConfig>,
    /// Present iff `ANTHROPIC_API_KEY` is set.
    pub anthropic: Option<AnthropicConfig>,
    /// Present iff `ELEVENLABS_API_KEY` is set.
    pub elevenlabs: Option<ElevenLabsConfig>,
    /// Always present; the service has a local default URL.
    pub comfyui: ComfyUiConfig,
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.into())
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3001`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `TEXT_PROVIDER_ORDER`  | `openai,anthropic`         |
    /// | `OPENAI_API_KEY`       | (unset)                    |
    /// | `OPENAI_BASE_URL`      | `https://api.openai.com/v1`|
    /// | `OPENAI_MODEL`         | `gpt-4o`                   |
    /// | `ANTHROPIC_API_KEY`    | (unset)                    |
    /// | `ANTHROPIC_MODEL`      | `claude-sonnet-4-20250514` |
    /// | `ELEVENLABS_API_KEY`   | (unset)                    |
    /// | `DEFAULT_VOICE_ID`     | ElevenLabs default voice   |
    /// | `MEDIA_ROOT`           | `public/uploads`           |
    /// | `MEDIA_PUBLIC_BASE`    | `/uploads`                 |
    /// | `COMFYUI_URL`          | `http://localhost:8188`    |
    pub fn from_env() -> Self {
        let host = env_or("HOST", "0.0.0.0");

        let port: u16 = env_or("PORT", "3000")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = env_or("CORS_ORIGINS", "http://localhost:3001")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            providers: ProviderSettings::from_env(),
        }
    }
}

impl ProviderSettings {
    /// Assemble provider configuration from environment variables.
    pub fn from_env() -> Self {
        let text_order = parse_provider_order(&env_or("TEXT_PROVIDER_ORDER", "openai,anthropic"))
            .expect("TEXT_PROVIDER_ORDER must be a valid provider list");

        // An empty key counts as unset so a blank .env line cannot select
        // a provider that can never authenticate.
        let openai = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .map(|api_key| OpenAiConfig {
                api_key,
                base_url: env_or("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
                model: env_or("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
            });

        let anthropic = std::env::var("ANTHROPIC_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .map(|api_key| AnthropicConfig {
                api_key,
                base_url: DEFAULT_ANTHROPIC_BASE_URL.to_string(),
                model: env_or("ANTHROPIC_MODEL", DEFAULT_ANTHROPIC_MODEL),
            });

        let elevenlabs = std::env::var("ELEVENLABS_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .map(|api_key| ElevenLabsConfig {
                api_key,
                base_url: DEFAULT_ELEVENLABS_BASE_URL.to_string(),
                default_voice_id: env_or("DEFAULT_VOICE_ID", DEFAULT_VOICE_ID),
                media_root: env_or("MEDIA_ROOT", "public/uploads").into(),
                public_base: env_or("MEDIA_PUBLIC_BASE", "/uploads"),
            });

        let comfyui = ComfyUiConfig {
            base_url: env_or("COMFYUI_URL", "http://localhost:8188"),
            poll_interval: Duration::from_secs(1),
            max_polls: 300,
        };

        Self {
            text_order,
            openai,
            anthropic,
            elevenlabs,
            comfyui,
        }
    }
}
