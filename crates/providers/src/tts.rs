//! ElevenLabs text-to-speech client.
//!
//! One call per generation attempt: synthesize the text, write the MP3
//! bytes under the configured media root, and hand back the web-relative
//! artifact path. The HTTP layer never writes partial artifacts -- the
//! file is only created after the full response body has arrived.

use async_trait::async_trait;
use serde::Serialize;

use playlet_core::generation::{ArtifactRef, ProviderError, SpeechProvider, SpeechRequest};

use crate::config::ElevenLabsConfig;

/// Synthesis model passed to the API.
const TTS_MODEL: &str = "eleven_multilingual_v2";

/// Voice stability setting.
const VOICE_STABILITY: f64 = 0.5;

/// Voice similarity boost setting.
const VOICE_SIMILARITY_BOOST: f64 = 0.75;

/// Subdirectory of the media root that audio artifacts land in.
const AUDIO_SUBDIR: &str = "audio";

/// Speech client for `POST {base_url}/v1/text-to-speech/{voice_id}`.
pub struct ElevenLabsTts {
    client: reqwest::Client,
    config: ElevenLabsConfig,
}

#[derive(Serialize)]
struct VoiceSettings {
    stability: f64,
    similarity_boost: f64,
}

#[derive(Serialize)]
struct SynthesisBody<'a> {
    text: &'a str,
    model_id: &'static str,
    voice_settings: VoiceSettings,
}

impl ElevenLabsTts {
    pub fn new(config: ElevenLabsConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Filesystem path and web path for a new audio artifact.
    fn artifact_paths(&self, file_name: &str) -> (std::path::PathBuf, String) {
        let fs_path = self.config.media_root.join(AUDIO_SUBDIR).join(file_name);
        let web_path = format!(
            "{}/{AUDIO_SUBDIR}/{file_name}",
            self.config.public_base.trim_end_matches('/')
        );
        (fs_path, web_path)
    }
}

#[async_trait]
impl SpeechProvider for ElevenLabsTts {
    async fn synthesize(&self, request: SpeechRequest) -> Result<ArtifactRef, ProviderError> {
        let voice_id = request
            .voice_id
            .as_deref()
            .unwrap_or(&self.config.default_voice_id);

        let body = SynthesisBody {
            text: &request.text,
            model_id: TTS_MODEL,
            voice_settings: VoiceSettings {
                stability: VOICE_STABILITY,
                similarity_boost: VOICE_SIMILARITY_BOOST,
            },
        };

        let response = self
            .client
            .post(format!(
                "{}/v1/text-to-speech/{voice_id}",
                self.config.base_url
            ))
            .header("xi-api-key", &self.config.api_key)
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
                "ElevenLabs API error ({status}): {body}"
            )));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| ProviderError::BadResponse(e.to_string()))?;

        let file_name = format!("tts_{}.mp3", uuid::Uuid::new_v4());
        let (fs_path, web_path) = self.artifact_paths(&file_name);

        if let Some(parent) = fs_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ProviderError::Request(format!("creating audio dir: {e}")))?;
        }
        tokio::fs::write(&fs_path, &audio)
            .await
            .map_err(|e| ProviderError::Request(format!("writing audio file: {e}")))?;

        tracing::info!(voice_id, path = %web_path, bytes = audio.len(), "Speech artifact written");

        Ok(ArtifactRef { path: web_path })
    }
}
