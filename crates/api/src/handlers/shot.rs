//! Handlers for the `/shots` resource.
//!
//! Shots can be created through an episode (`POST /episodes/{id}/shots`)
//! or a storyboard (`POST /storyboards/{id}/shots`). Every shot belongs
//! to a storyboard: the episode route resolves a missing `storyboard_id`
//! to the episode's default board (board 0), creating it on first use.
//! A duplicate shot number within a board is rejected with 409; there is
//! no silent renumbering.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use playlet_core::error::CoreError;
use playlet_core::participants::parse_participant_ids;
use playlet_core::types::DbId;
use playlet_db::models::shot::{CreateShot, Shot, UpdateShot};
use playlet_db::repositories::{EpisodeRepo, ShotRepo, StoryboardRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for creating a shot. Authoring fields only; status and
/// artifact columns are owned by the generation tracker.
#[derive(Debug, Deserialize)]
pub struct CreateShotRequest {
    /// Target storyboard. Omitted on the episode route to use the
    /// episode's default board.
    pub storyboard_id: Option<DbId>,
    pub shot_number: i32,
    pub shot_type: Option<String>,
    pub camera_movement: Option<String>,
    pub shot_description: Option<String>,
    pub dialogue_text: Option<String>,
    pub video_prompt: Option<String>,
    pub character_id: Option<DbId>,
    pub character_ids: Option<serde_json::Value>,
    pub scene_id: Option<DbId>,
    pub character_image: Option<String>,
    pub scene_image: Option<String>,
    pub duration_secs: Option<f64>,
}

impl CreateShotRequest {
    fn into_create(self, episode_id: DbId, storyboard_id: DbId) -> CreateShot {
        CreateShot {
            episode_id,
            storyboard_id,
            shot_number: self.shot_number,
            shot_type: self.shot_type,
            camera_movement: self.camera_movement,
            shot_description: self.shot_description,
            dialogue_text: self.dialogue_text,
            video_prompt: self.video_prompt,
            character_id: self.character_id,
            character_ids: self.character_ids,
            scene_id: self.scene_id,
            character_image: self.character_image,
            scene_image: self.scene_image,
            duration_secs: self.duration_secs,
        }
    }
}

fn validate_request(shot_number: i32, character_ids: Option<&serde_json::Value>) -> AppResult<()> {
    if shot_number <= 0 {
        return Err(AppError::Core(CoreError::Validation(
            "shot_number must be a positive integer".to_string(),
        )));
    }
    parse_participant_ids(character_ids).map_err(AppError::Core)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Creation routes
// ---------------------------------------------------------------------------

/// POST /api/v1/episodes/{episode_id}/shots
///
/// Without `storyboard_id`, the shot lands on the episode's default
/// board (created on first use). With one, the board must belong to the
/// episode.
pub async fn create_for_episode(
    State(state): State<AppState>,
    Path(episode_id): Path<DbId>,
    Json(input): Json<CreateShotRequest>,
) -> AppResult<(StatusCode, Json<Shot>)> {
    validate_request(input.shot_number, input.character_ids.as_ref())?;

    EpisodeRepo::find_by_id(&state.pool, episode_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Episode",
            id: episode_id,
        }))?;

    let storyboard_id = match input.storyboard_id {
        Some(id) => {
            let storyboard = StoryboardRepo::find_by_id(&state.pool, id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Storyboard",
                    id,
                }))?;
            if storyboard.episode_id != episode_id {
                return Err(AppError::Core(CoreError::Validation(format!(
                    "Storyboard {id} does not belong to episode {episode_id}"
                ))));
            }
            id
        }
        None => {
            StoryboardRepo::find_or_create_default(&state.pool, episode_id)
                .await?
                .id
        }
    };

    let shot = ShotRepo::create(&state.pool, &input.into_create(episode_id, storyboard_id)).await?;

    tracing::info!(
        shot_id = shot.id,
        episode_id,
        storyboard_id,
        shot_number = shot.shot_number,
        "Shot created"
    );

    Ok((StatusCode::CREATED, Json(shot)))
}

/// POST /api/v1/storyboards/{storyboard_id}/shots
pub async fn create_for_storyboard(
    State(state): State<AppState>,
    Path(storyboard_id): Path<DbId>,
    Json(input): Json<CreateShotRequest>,
) -> AppResult<(StatusCode, Json<Shot>)> {
    validate_request(input.shot_number, input.character_ids.as_ref())?;

    let storyboard = StoryboardRepo::find_by_id(&state.pool, storyboard_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Storyboard",
            id: storyboard_id,
        }))?;

    let shot = ShotRepo::create(
        &state.pool,
        &input.into_create(storyboard.episode_id, storyboard_id),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(shot)))
}

// ---------------------------------------------------------------------------
// Listing and item routes
// ---------------------------------------------------------------------------

/// GET /api/v1/episodes/{episode_id}/shots
pub async fn list_by_episode(
    State(state): State<AppState>,
    Path(episode_id): Path<DbId>,
) -> AppResult<Json<Vec<Shot>>> {
    let shots = ShotRepo::list_by_episode(&state.pool, episode_id).await?;
    Ok(Json(shots))
}

/// GET /api/v1/storyboards/{storyboard_id}/shots
pub async fn list_by_storyboard(
    State(state): State<AppState>,
    Path(storyboard_id): Path<DbId>,
) -> AppResult<Json<Vec<Shot>>> {
    let shots = ShotRepo::list_by_storyboard(&state.pool, storyboard_id).await?;
    Ok(Json(shots))
}

/// GET /api/v1/shots/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Shot>> {
    let shot = ShotRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Shot", id }))?;
    Ok(Json(shot))
}

/// PUT /api/v1/shots/{id}
///
/// Authoring edit. Status and artifact columns are not reachable from
/// this route; generation outcomes cannot be reverted here.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateShot>,
) -> AppResult<Json<Shot>> {
    if matches!(input.shot_number, Some(n) if n <= 0) {
        return Err(AppError::Core(CoreError::Validation(
            "shot_number must be a positive integer".to_string(),
        )));
    }
    parse_participant_ids(input.character_ids.as_ref()).map_err(AppError::Core)?;

    let shot = ShotRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Shot", id }))?;
    Ok(Json(shot))
}

/// DELETE /api/v1/shots/{id}
///
/// Artifacts already written to external storage are not cleaned up
/// here; file storage is managed by its own collaborator.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = ShotRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Shot", id }))
    }
}
