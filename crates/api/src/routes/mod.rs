//! Route definitions.

pub mod character;
pub mod episode;
pub mod health;
pub mod project;
pub mod scene;
pub mod shot;
pub mod storyboard;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                                 list, create
/// /projects/{id}                            get, update, delete
/// /projects/{project_id}/characters         list, create
/// /projects/{project_id}/scenes             list, create
/// /projects/{project_id}/episodes           list, create
/// /projects/{id}/generate/characters        propose + persist cast (POST)
/// /projects/{id}/generate/scenes            propose + persist scenes (POST)
/// /projects/{id}/generate/outline           per-episode outline (POST)
///
/// /characters/{id}                          get, update, delete
///
/// /scenes/{id}                              get, update, delete
///
/// /episodes/{id}                            get, update, delete
/// /episodes/{id}/shots                      list, create (default board fallback)
/// /episodes/{id}/storyboards                list, create
/// /episodes/{id}/generate/shots             storyboard a dialogue script (POST)
///
/// /storyboards/{id}                         get, update, delete (409 while occupied)
/// /storyboards/{id}/shots                   list, create
///
/// /shots/{id}                               get, update, delete
/// /shots/{id}/status                        generation status poll (GET)
/// /shots/{id}/generate/speech               speech attempt (POST)
/// /shots/{id}/generate/video                video attempt (POST)
/// /shots/{id}/generate/lip-sync             lip-sync attempt (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .nest("/characters", character::router())
        .nest("/scenes", scene::router())
        .nest("/episodes", episode::router())
        .nest("/storyboards", storyboard::router())
        .nest("/shots", shot::router())
}
