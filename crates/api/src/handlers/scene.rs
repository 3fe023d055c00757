//! Handlers for the `/scenes` resource (nested under projects for
//! list/create).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use playlet_core::error::CoreError;
use playlet_core::types::DbId;
use playlet_db::models::scene::{CreateScene, Scene, UpdateScene};
use playlet_db::repositories::{ProjectRepo, SceneRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/projects/{project_id}/scenes
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateScene>,
) -> AppResult<(StatusCode, Json<Scene>)> {
    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let scene = SceneRepo::create(&state.pool, project_id, &input).await?;
    Ok((StatusCode::CREATED, Json(scene)))
}

/// GET /api/v1/projects/{project_id}/scenes
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<Scene>>> {
    let scenes = SceneRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(scenes))
}

/// GET /api/v1/scenes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Scene>> {
    let scene = SceneRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Scene", id }))?;
    Ok(Json(scene))
}

/// PUT /api/v1/scenes/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateScene>,
) -> AppResult<Json<Scene>> {
    let scene = SceneRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Scene", id }))?;
    Ok(Json(scene))
}

/// DELETE /api/v1/scenes/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = SceneRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Scene", id }))
    }
}
