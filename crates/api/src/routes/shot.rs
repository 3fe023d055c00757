//! Route definitions for the `/shots` resource and the generation
//! lifecycle endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{generation, shot};
use crate::state::AppState;

/// Routes mounted at `/shots`.
///
/// ```text
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update (authoring fields only)
/// DELETE /{id}                      -> delete
///
/// GET    /{id}/status               -> get_status (read-only poll)
/// POST   /{id}/generate/speech      -> generate_speech
/// POST   /{id}/generate/video       -> generate_video
/// POST   /{id}/generate/lip-sync    -> generate_lip_sync
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(shot::get_by_id).put(shot::update).delete(shot::delete),
        )
        .route("/{id}/status", get(generation::get_status))
        .route("/{id}/generate/speech", post(generation::generate_speech))
        .route("/{id}/generate/video", post(generation::generate_video))
        .route(
            "/{id}/generate/lip-sync",
            post(generation::generate_lip_sync),
        )
}
