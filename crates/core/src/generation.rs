//! Generation dispatch contract and per-kind precondition checks.
//!
//! A shot is the smallest unit sent to an external generation provider.
//! This module defines the three provider interfaces (chat, speech,
//! video), the typed requests they accept, and the pure precondition
//! functions the API layer runs before claiming a shot for generation.
//! Status persistence itself lives in the repository layer; nothing here
//! touches the database.

use async_trait::async_trait;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Kinds
// ---------------------------------------------------------------------------

/// The kind of artifact a generation attempt produces.
///
/// Each kind writes exactly one artifact column on the shot:
/// speech audio, silent video, or lip-synced video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationKind {
    Speech,
    Video,
    LipSync,
}

impl GenerationKind {
    /// Stable lowercase name used in logs and API paths.
    pub fn as_str(self) -> &'static str {
        match self {
            GenerationKind::Speech => "speech",
            GenerationKind::Video => "video",
            GenerationKind::LipSync => "lip_sync",
        }
    }
}

impl std::fmt::Display for GenerationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Requests and results
// ---------------------------------------------------------------------------

/// A file or URL reference produced by a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRef {
    /// Web-relative path or absolute URL of the produced artifact.
    pub path: String,
}

/// Errors surfaced by provider clients.
///
/// Providers are invoked exactly once per generation attempt; a failure
/// transitions the owning shot to `Failed` and the message is returned
/// to the caller as-is. A malformed provider response is reported the
/// same way as a transport failure.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Provider request failed: {0}")]
    Request(String),

    #[error("Provider returned an unusable response: {0}")]
    BadResponse(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

/// Request for a chat-completion provider.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub system: Option<String>,
    pub prompt: String,
    /// Sampling temperature; providers default to 0.7 when `None`.
    pub temperature: Option<f64>,
}

/// Request for a text-to-speech provider.
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    pub text: String,
    /// Provider voice identifier; the client falls back to its configured
    /// default voice when `None`.
    pub voice_id: Option<String>,
}

/// Request for an image-to-video provider.
#[derive(Debug, Clone)]
pub struct VideoRequest {
    pub image_url: String,
    pub prompt: String,
}

/// Request for a lip-sync provider.
#[derive(Debug, Clone)]
pub struct LipSyncRequest {
    pub image_url: String,
    pub audio_url: String,
    pub prompt: Option<String>,
}

// ---------------------------------------------------------------------------
// Provider interfaces
// ---------------------------------------------------------------------------

/// A chat-completion provider. Returns the raw assistant text.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn complete(&self, request: ChatRequest) -> Result<String, ProviderError>;

    /// Short stable name for logs ("openai", "anthropic").
    fn name(&self) -> &'static str;
}

/// A speech-synthesis provider. One call, one audio artifact.
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    async fn synthesize(&self, request: SpeechRequest) -> Result<ArtifactRef, ProviderError>;
}

/// A video-generation provider covering both silent image-to-video and
/// lip-synced renders.
#[async_trait]
pub trait VideoProvider: Send + Sync {
    async fn image_to_video(&self, request: VideoRequest) -> Result<ArtifactRef, ProviderError>;

    async fn lip_sync(&self, request: LipSyncRequest) -> Result<ArtifactRef, ProviderError>;
}

// ---------------------------------------------------------------------------
// Preconditions
// ---------------------------------------------------------------------------

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Resolve the text a speech attempt will synthesize.
///
/// Caller-supplied text wins; otherwise the shot's description is used.
/// Blank or whitespace-only values count as missing.
pub fn resolve_speech_text(
    explicit: Option<&str>,
    shot_description: Option<&str>,
) -> Result<String, CoreError> {
    non_blank(explicit)
        .or_else(|| non_blank(shot_description))
        .map(str::to_string)
        .ok_or_else(|| {
            CoreError::MissingInput(
                "speech generation requires text or a shot description".to_string(),
            )
        })
}

/// Check the inputs for an image-to-video attempt.
///
/// Returns `(character_image, scene_image)` when both reference images
/// are resolved on the shot.
pub fn resolve_video_inputs<'a>(
    character_image: Option<&'a str>,
    scene_image: Option<&'a str>,
) -> Result<(&'a str, &'a str), CoreError> {
    let character = non_blank(character_image).ok_or_else(|| {
        CoreError::MissingInput("video generation requires a character reference image".to_string())
    })?;
    let scene = non_blank(scene_image).ok_or_else(|| {
        CoreError::MissingInput("video generation requires a scene reference image".to_string())
    })?;
    Ok((character, scene))
}

/// Check the inputs for a lip-sync attempt.
///
/// Requires a character reference image and a previously produced speech
/// artifact; returns `(character_image, audio_path)`.
pub fn resolve_lip_sync_inputs<'a>(
    character_image: Option<&'a str>,
    tts_audio_path: Option<&'a str>,
) -> Result<(&'a str, &'a str), CoreError> {
    let character = non_blank(character_image).ok_or_else(|| {
        CoreError::MissingInput(
            "lip-sync generation requires a character reference image".to_string(),
        )
    })?;
    let audio = non_blank(tts_audio_path).ok_or_else(|| {
        CoreError::MissingInput(
            "lip-sync generation requires a previously generated speech artifact".to_string(),
        )
    })?;
    Ok((character, audio))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- resolve_speech_text -------------------------------------------------

    #[test]
    fn speech_text_prefers_explicit_input() {
        let text = resolve_speech_text(Some("Hello world"), Some("description")).unwrap();
        assert_eq!(text, "Hello world");
    }

    #[test]
    fn speech_text_falls_back_to_description() {
        let text = resolve_speech_text(None, Some("A quiet rooftop at dusk")).unwrap();
        assert_eq!(text, "A quiet rooftop at dusk");
    }

    #[test]
    fn speech_text_missing_when_both_absent() {
        assert!(resolve_speech_text(None, None).is_err());
    }

    #[test]
    fn speech_text_missing_when_both_blank() {
        assert!(resolve_speech_text(Some("   "), Some("")).is_err());
    }

    #[test]
    fn speech_blank_explicit_falls_through_to_description() {
        let text = resolve_speech_text(Some(" "), Some("fallback")).unwrap();
        assert_eq!(text, "fallback");
    }

    // -- resolve_video_inputs ------------------------------------------------

    #[test]
    fn video_inputs_both_present() {
        let (character, scene) =
            resolve_video_inputs(Some("/img/char.png"), Some("/img/scene.png")).unwrap();
        assert_eq!(character, "/img/char.png");
        assert_eq!(scene, "/img/scene.png");
    }

    #[test]
    fn video_inputs_missing_character_image() {
        assert!(resolve_video_inputs(None, Some("/img/scene.png")).is_err());
    }

    #[test]
    fn video_inputs_missing_scene_image() {
        assert!(resolve_video_inputs(Some("/img/char.png"), None).is_err());
    }

    // -- resolve_lip_sync_inputs ---------------------------------------------

    #[test]
    fn lip_sync_inputs_present() {
        let (character, audio) =
            resolve_lip_sync_inputs(Some("/img/char.png"), Some("/uploads/audio/tts_1.mp3"))
                .unwrap();
        assert_eq!(character, "/img/char.png");
        assert_eq!(audio, "/uploads/audio/tts_1.mp3");
    }

    #[test]
    fn lip_sync_requires_speech_artifact() {
        assert!(resolve_lip_sync_inputs(Some("/img/char.png"), None).is_err());
    }

    #[test]
    fn lip_sync_requires_character_image() {
        assert!(resolve_lip_sync_inputs(None, Some("/uploads/audio/tts_1.mp3")).is_err());
    }

    // -- kinds ---------------------------------------------------------------

    #[test]
    fn kind_names_are_stable() {
        assert_eq!(GenerationKind::Speech.as_str(), "speech");
        assert_eq!(GenerationKind::Video.as_str(), "video");
        assert_eq!(GenerationKind::LipSync.as_str(), "lip_sync");
    }
}
