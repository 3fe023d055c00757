//! Handlers for the `/storyboards` resource (nested under episodes for
//! list/create).
//!
//! A storyboard is an ordered group of shots. Deleting a board that
//! still owns shots is rejected; the shots must be moved or deleted
//! first.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use playlet_core::error::CoreError;
use playlet_core::types::DbId;
use playlet_db::models::storyboard::{CreateStoryboard, Storyboard, UpdateStoryboard};
use playlet_db::repositories::{EpisodeRepo, ShotRepo, StoryboardRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/episodes/{episode_id}/storyboards
///
/// A duplicate board number within the episode is rejected with 409.
pub async fn create(
    State(state): State<AppState>,
    Path(episode_id): Path<DbId>,
    Json(input): Json<CreateStoryboard>,
) -> AppResult<(StatusCode, Json<Storyboard>)> {
    if input.board_number <= 0 {
        return Err(AppError::Core(CoreError::Validation(
            "board_number must be a positive integer".to_string(),
        )));
    }

    EpisodeRepo::find_by_id(&state.pool, episode_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Episode",
            id: episode_id,
        }))?;

    let storyboard = StoryboardRepo::create(&state.pool, episode_id, &input).await?;
    Ok((StatusCode::CREATED, Json(storyboard)))
}

/// GET /api/v1/episodes/{episode_id}/storyboards
pub async fn list_by_episode(
    State(state): State<AppState>,
    Path(episode_id): Path<DbId>,
) -> AppResult<Json<Vec<Storyboard>>> {
    let storyboards = StoryboardRepo::list_by_episode(&state.pool, episode_id).await?;
    Ok(Json(storyboards))
}

/// GET /api/v1/storyboards/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Storyboard>> {
    let storyboard = StoryboardRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Storyboard",
            id,
        }))?;
    Ok(Json(storyboard))
}

/// PUT /api/v1/storyboards/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStoryboard>,
) -> AppResult<Json<Storyboard>> {
    if matches!(input.board_number, Some(n) if n <= 0) {
        return Err(AppError::Core(CoreError::Validation(
            "board_number must be a positive integer".to_string(),
        )));
    }

    let storyboard = StoryboardRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Storyboard",
            id,
        }))?;
    Ok(Json(storyboard))
}

/// DELETE /api/v1/storyboards/{id}
///
/// Rejected with 409 while the board still owns shots. The FK is
/// RESTRICT, so a racing shot creation cannot slip past the check.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    StoryboardRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Storyboard",
            id,
        }))?;

    let shot_count = ShotRepo::count_for_storyboard(&state.pool, id).await?;
    if shot_count > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Cannot delete storyboard {id}: it still owns {shot_count} shot(s)"
        ))));
    }

    let deleted = StoryboardRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Storyboard",
            id,
        }))
    }
}
