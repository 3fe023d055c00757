use std::sync::Arc;

use playlet_core::generation::{ChatProvider, SpeechProvider, VideoProvider};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`). Provider handles are trait objects so integration tests can
/// substitute in-process fakes for the external services.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: playlet_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Text-generation provider router; `None` when no chat API key is
    /// configured (script endpoints then report a provider failure).
    pub chat: Option<Arc<dyn ChatProvider>>,
    /// Speech synthesis provider; `None` when no TTS API key is configured.
    pub speech: Option<Arc<dyn SpeechProvider>>,
    /// Video generation provider (always constructible; the node-graph
    /// service has a local default URL).
    pub video: Arc<dyn VideoProvider>,
}
