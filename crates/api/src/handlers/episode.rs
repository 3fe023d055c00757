//! Handlers for the `/episodes` resource (nested under projects for
//! list/create).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use playlet_core::error::CoreError;
use playlet_core::types::DbId;
use playlet_db::models::episode::{CreateEpisode, Episode, UpdateEpisode};
use playlet_db::repositories::{EpisodeRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/projects/{project_id}/episodes
///
/// A duplicate episode number within the project is rejected with 409.
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateEpisode>,
) -> AppResult<(StatusCode, Json<Episode>)> {
    if input.episode_number <= 0 {
        return Err(AppError::Core(CoreError::Validation(
            "episode_number must be a positive integer".to_string(),
        )));
    }

    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let episode = EpisodeRepo::create(&state.pool, project_id, &input).await?;
    Ok((StatusCode::CREATED, Json(episode)))
}

/// GET /api/v1/projects/{project_id}/episodes
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<Episode>>> {
    let episodes = EpisodeRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(episodes))
}

/// GET /api/v1/episodes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Episode>> {
    let episode = EpisodeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Episode",
            id,
        }))?;
    Ok(Json(episode))
}

/// PUT /api/v1/episodes/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEpisode>,
) -> AppResult<Json<Episode>> {
    if matches!(input.episode_number, Some(n) if n <= 0) {
        return Err(AppError::Core(CoreError::Validation(
            "episode_number must be a positive integer".to_string(),
        )));
    }

    let episode = EpisodeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Episode",
            id,
        }))?;
    Ok(Json(episode))
}

/// DELETE /api/v1/episodes/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = EpisodeRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Episode",
            id,
        }))
    }
}
