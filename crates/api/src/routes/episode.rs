//! Route definitions for the `/episodes` resource.
//!
//! List/create live under `/projects/{project_id}/episodes`. Episode
//! item routes plus shot/storyboard sub-resources and dialogue
//! storyboarding are mounted here.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{episode, script, shot, storyboard};
use crate::state::AppState;

/// Routes mounted at `/episodes`.
///
/// ```text
/// GET    /{id}                  -> get_by_id
/// PUT    /{id}                  -> update
/// DELETE /{id}                  -> delete
///
/// GET    /{episode_id}/shots        -> list_by_episode
/// POST   /{episode_id}/shots        -> create_for_episode (default board fallback)
/// GET    /{episode_id}/storyboards  -> list_by_episode
/// POST   /{episode_id}/storyboards  -> create
///
/// POST   /{id}/generate/shots       -> generate_shots
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(episode::get_by_id)
                .put(episode::update)
                .delete(episode::delete),
        )
        .route(
            "/{episode_id}/shots",
            get(shot::list_by_episode).post(shot::create_for_episode),
        )
        .route(
            "/{episode_id}/storyboards",
            get(storyboard::list_by_episode).post(storyboard::create),
        )
        .route("/{id}/generate/shots", post(script::generate_shots))
}
