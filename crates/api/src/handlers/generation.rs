//! Generation lifecycle handlers.
//!
//! Routes:
//! - `POST /shots/{id}/generate/speech`   — synthesize dialogue audio
//! - `POST /shots/{id}/generate/video`    — animate the reference images
//! - `POST /shots/{id}/generate/lip-sync` — lip-sync the speech artifact
//! - `GET  /shots/{id}/status`            — read-only status poll
//!
//! Every attempt follows the same shape: check the kind's preconditions
//! (no state change on failure), atomically claim the shot by moving it
//! to `Generating`, invoke the provider, then settle with `Completed`
//! plus exactly one artifact column, or `Failed` with none. A shot with
//! an attempt already in flight yields 409 and is left untouched. Both
//! terminal states can be re-claimed: a failed shot may be retried and a
//! completed one regenerated (the next success replaces the artifact).
//!
//! There is no cancellation and no tracker-imposed deadline on the
//! provider call; callers poll the status route until the shot leaves
//! `Generating`.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use playlet_core::error::CoreError;
use playlet_core::generation::{
    self, ArtifactRef, GenerationKind, LipSyncRequest, ProviderError, SpeechRequest, VideoRequest,
};
use playlet_core::types::DbId;
use playlet_db::models::shot::Shot;
use playlet_db::models::status::{shot_status_name, StatusId};
use playlet_db::repositories::{EpisodeRepo, ProjectRepo, ShotRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for speech generation.
#[derive(Debug, Deserialize, Default)]
pub struct GenerateSpeechRequest {
    /// Text to synthesize. Falls back to the shot's description.
    pub text: Option<String>,
    /// Voice override. Falls back to the project's default voice.
    pub voice_id: Option<String>,
}

/// Request body for video generation.
#[derive(Debug, Deserialize, Default)]
pub struct GenerateVideoRequest {
    /// Prompt override. Falls back to the shot's stored video prompt.
    pub prompt: Option<String>,
}

/// Request body for lip-sync generation.
#[derive(Debug, Deserialize, Default)]
pub struct GenerateLipSyncRequest {
    pub prompt: Option<String>,
}

/// Read model for the status poll: current status plus all artifacts.
#[derive(Debug, Serialize)]
pub struct ShotStatusView {
    pub id: DbId,
    pub status_id: StatusId,
    pub status: &'static str,
    pub tts_audio_path: Option<String>,
    pub video_path: Option<String>,
    pub lipsync_video_path: Option<String>,
}

impl From<&Shot> for ShotStatusView {
    fn from(shot: &Shot) -> Self {
        Self {
            id: shot.id,
            status_id: shot.status_id,
            status: shot_status_name(shot.status_id),
            tts_audio_path: shot.tts_audio_path.clone(),
            video_path: shot.video_path.clone(),
            lipsync_video_path: shot.lipsync_video_path.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Load a shot or fail with 404.
async fn load_shot(state: &AppState, id: DbId) -> AppResult<Shot> {
    ShotRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Shot", id }))
}

/// Atomically claim the shot for a generation attempt.
///
/// The shot was loaded just before, so a `None` here means another
/// attempt holds the claim: 409, nothing mutated.
async fn claim(state: &AppState, shot_id: DbId, kind: GenerationKind) -> AppResult<Shot> {
    let claimed = ShotRepo::claim_for_generation(&state.pool, shot_id).await?;
    match claimed {
        Some(shot) => {
            tracing::info!(shot_id, kind = %kind, "Generation attempt started");
            Ok(shot)
        }
        None => Err(AppError::Core(CoreError::Conflict(format!(
            "A generation attempt is already in progress for shot {shot_id}"
        )))),
    }
}

/// Settle a claimed shot from the provider outcome.
///
/// Success writes the artifact column matching `kind` and `Completed`;
/// failure writes `Failed` and surfaces the provider diagnostic. Every
/// claim passes through here, so a claimed shot can only be left
/// `Generating` if the settle write itself fails — and that error is
/// surfaced, not swallowed.
async fn settle(
    state: &AppState,
    shot_id: DbId,
    kind: GenerationKind,
    outcome: Result<ArtifactRef, ProviderError>,
) -> AppResult<Shot> {
    match outcome {
        Ok(artifact) => {
            let shot =
                ShotRepo::complete_generation(&state.pool, shot_id, kind, &artifact.path)
                    .await?
                    .ok_or_else(|| {
                        AppError::InternalError(format!(
                            "shot {shot_id} left Generating while an attempt held the claim"
                        ))
                    })?;
            tracing::info!(shot_id, kind = %kind, artifact = %artifact.path, "Generation completed");
            Ok(shot)
        }
        Err(err) => {
            ShotRepo::fail_generation(&state.pool, shot_id).await?;
            tracing::warn!(shot_id, kind = %kind, error = %err, "Generation failed");
            Err(AppError::Core(CoreError::Provider(err.to_string())))
        }
    }
}

/// Default voice for a shot: the owning project's configured voice.
async fn project_default_voice(state: &AppState, shot: &Shot) -> AppResult<Option<String>> {
    let Some(episode) = EpisodeRepo::find_by_id(&state.pool, shot.episode_id).await? else {
        return Ok(None);
    };
    let Some(project) = ProjectRepo::find_by_id(&state.pool, episode.project_id).await? else {
        return Ok(None);
    };
    Ok(project.default_voice_id)
}

// ---------------------------------------------------------------------------
// POST /shots/{id}/generate/speech
// ---------------------------------------------------------------------------

/// Synthesize the shot's dialogue audio.
///
/// Precondition: explicit `text`, or a non-empty shot description.
pub async fn generate_speech(
    State(state): State<AppState>,
    Path(shot_id): Path<DbId>,
    Json(input): Json<GenerateSpeechRequest>,
) -> AppResult<impl IntoResponse> {
    let shot = load_shot(&state, shot_id).await?;

    let text = generation::resolve_speech_text(
        input.text.as_deref(),
        shot.shot_description.as_deref(),
    )
    .map_err(AppError::Core)?;

    let speech = state.speech.clone().ok_or(AppError::Core(CoreError::Provider(
        "speech provider not configured".to_string(),
    )))?;

    let voice_id = match input.voice_id {
        Some(voice) => Some(voice),
        None => project_default_voice(&state, &shot).await?,
    };

    let shot = claim(&state, shot_id, GenerationKind::Speech).await?;

    let outcome = speech.synthesize(SpeechRequest { text, voice_id }).await;
    let shot = settle(&state, shot.id, GenerationKind::Speech, outcome).await?;

    Ok(Json(DataResponse { data: shot }))
}

// ---------------------------------------------------------------------------
// POST /shots/{id}/generate/video
// ---------------------------------------------------------------------------

/// Animate the shot's reference images into a silent video clip.
///
/// Precondition: both the character and scene reference images resolved.
pub async fn generate_video(
    State(state): State<AppState>,
    Path(shot_id): Path<DbId>,
    Json(input): Json<GenerateVideoRequest>,
) -> AppResult<impl IntoResponse> {
    let shot = load_shot(&state, shot_id).await?;

    let (character_image, _scene_image) = generation::resolve_video_inputs(
        shot.character_image.as_deref(),
        shot.scene_image.as_deref(),
    )
    .map_err(AppError::Core)?;

    let prompt = input
        .prompt
        .or_else(|| shot.video_prompt.clone())
        .unwrap_or_default();
    let request = VideoRequest {
        image_url: character_image.to_string(),
        prompt,
    };

    let shot = claim(&state, shot_id, GenerationKind::Video).await?;

    let outcome = state.video.image_to_video(request).await;
    let shot = settle(&state, shot.id, GenerationKind::Video, outcome).await?;

    Ok(Json(DataResponse { data: shot }))
}

// ---------------------------------------------------------------------------
// POST /shots/{id}/generate/lip-sync
// ---------------------------------------------------------------------------

/// Lip-sync the character image to the previously generated speech.
///
/// Precondition: a character reference image and a speech artifact.
pub async fn generate_lip_sync(
    State(state): State<AppState>,
    Path(shot_id): Path<DbId>,
    Json(input): Json<GenerateLipSyncRequest>,
) -> AppResult<impl IntoResponse> {
    let shot = load_shot(&state, shot_id).await?;

    let (character_image, audio_path) = generation::resolve_lip_sync_inputs(
        shot.character_image.as_deref(),
        shot.tts_audio_path.as_deref(),
    )
    .map_err(AppError::Core)?;

    let request = LipSyncRequest {
        image_url: character_image.to_string(),
        audio_url: audio_path.to_string(),
        prompt: input.prompt,
    };

    let shot = claim(&state, shot_id, GenerationKind::LipSync).await?;

    let outcome = state.video.lip_sync(request).await;
    let shot = settle(&state, shot.id, GenerationKind::LipSync, outcome).await?;

    Ok(Json(DataResponse { data: shot }))
}

// ---------------------------------------------------------------------------
// GET /shots/{id}/status
// ---------------------------------------------------------------------------

/// Read-only status poll: current status and all artifact paths.
///
/// Safe to call at any frequency; repeating it never changes state.
pub async fn get_status(
    State(state): State<AppState>,
    Path(shot_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let shot = load_shot(&state, shot_id).await?;
    Ok(Json(DataResponse {
        data: ShotStatusView::from(&shot),
    }))
}
