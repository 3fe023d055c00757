//! Shared test harness: builds the full application router around a
//! test state whose provider handles are in-process stubs, and provides
//! request helpers for tower `oneshot` calls.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use playlet_api::config::{ProviderSettings, ServerConfig};
use playlet_api::routes;
use playlet_api::state::AppState;
use playlet_comfyui::ComfyUiConfig;
use playlet_core::generation::{
    ArtifactRef, ChatProvider, ChatRequest, LipSyncRequest, ProviderError, SpeechProvider,
    SpeechRequest, VideoProvider, VideoRequest,
};
use playlet_providers::config::TextProvider;

// ---------------------------------------------------------------------------
// Stub providers
// ---------------------------------------------------------------------------

/// Speech stub: returns the fixed artifact path, or fails when `None`.
pub struct StubSpeech {
    pub artifact: Option<&'static str>,
}

#[async_trait]
impl SpeechProvider for StubSpeech {
    async fn synthesize(&self, _request: SpeechRequest) -> Result<ArtifactRef, ProviderError> {
        match self.artifact {
            Some(path) => Ok(ArtifactRef {
                path: path.to_string(),
            }),
            None => Err(ProviderError::Request("speech synthesis exploded".to_string())),
        }
    }
}

/// Video stub: both methods return the fixed artifact path, or fail when
/// `None`.
pub struct StubVideo {
    pub artifact: Option<&'static str>,
}

impl StubVideo {
    fn result(&self) -> Result<ArtifactRef, ProviderError> {
        match self.artifact {
            Some(path) => Ok(ArtifactRef {
                path: path.to_string(),
            }),
            None => Err(ProviderError::Request("workflow failed: node 3".to_string())),
        }
    }
}

#[async_trait]
impl VideoProvider for StubVideo {
    async fn image_to_video(&self, _request: VideoRequest) -> Result<ArtifactRef, ProviderError> {
        self.result()
    }

    async fn lip_sync(&self, _request: LipSyncRequest) -> Result<ArtifactRef, ProviderError> {
        self.result()
    }
}

/// Chat stub: returns a canned reply verbatim.
pub struct StubChat {
    pub reply: String,
}

#[async_trait]
impl ChatProvider for StubChat {
    async fn complete(&self, _request: ChatRequest) -> Result<String, ProviderError> {
        Ok(self.reply.clone())
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults and no real provider
/// keys.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3001".to_string()],
        request_timeout_secs: 30,
        providers: ProviderSettings {
            text_order: vec![TextProvider::OpenAi, TextProvider::Anthropic],
            openai: None,
            anthropic: None,
            elevenlabs: None,
            comfyui: ComfyUiConfig::default(),
        },
    }
}

/// Build an `AppState` around the pool and the given provider stubs.
pub fn test_state(
    pool: PgPool,
    chat: Option<Arc<dyn ChatProvider>>,
    speech: Option<Arc<dyn SpeechProvider>>,
    video: Arc<dyn VideoProvider>,
) -> AppState {
    AppState {
        pool,
        config: Arc::new(test_config()),
        chat,
        speech,
        video,
    }
}

/// Build the full application router with all middleware layers around a
/// state. This mirrors the router construction in `main.rs` so
/// integration tests exercise the same middleware stack that production
/// uses.
pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:3001".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Convenience: app with always-succeeding speech/video stubs and no
/// chat provider.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app(test_state(
        pool,
        None,
        Some(Arc::new(StubSpeech {
            artifact: Some("/uploads/audio/tts_1.mp3"),
        })),
        Arc::new(StubVideo {
            artifact: Some("http://localhost:8188/view?filename=wan_00012.mp4&type=output"),
        }),
    ))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(
        app,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(
        app,
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(
        app,
        Request::builder()
            .method(Method::PUT)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(
        app,
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
