//! Route definitions for the `/projects` resource.
//!
//! Also nests character, scene, and episode list/create routes plus the
//! script-generation endpoints under `/projects/{...}`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{character, episode, project, scene, script};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// GET    /{id}                              -> get_by_id
/// PUT    /{id}                              -> update
/// DELETE /{id}                              -> delete
///
/// GET    /{project_id}/characters           -> list_by_project
/// POST   /{project_id}/characters           -> create
/// GET    /{project_id}/scenes               -> list_by_project
/// POST   /{project_id}/scenes               -> create
/// GET    /{project_id}/episodes             -> list_by_project
/// POST   /{project_id}/episodes             -> create
///
/// POST   /{id}/generate/characters          -> generate_characters
/// POST   /{id}/generate/scenes              -> generate_scenes
/// POST   /{id}/generate/outline             -> generate_outline
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route(
            "/{project_id}/characters",
            get(character::list_by_project).post(character::create),
        )
        .route(
            "/{project_id}/scenes",
            get(scene::list_by_project).post(scene::create),
        )
        .route(
            "/{project_id}/episodes",
            get(episode::list_by_project).post(episode::create),
        )
        .route("/{id}/generate/characters", post(script::generate_characters))
        .route("/{id}/generate/scenes", post(script::generate_scenes))
        .route("/{id}/generate/outline", post(script::generate_outline))
}
