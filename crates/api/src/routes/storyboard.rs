//! Route definitions for the `/storyboards` resource.
//!
//! List/create live under `/episodes/{episode_id}/storyboards`; item
//! routes and the board's shot sub-resource are mounted here.

use axum::routing::get;
use axum::Router;

use crate::handlers::{shot, storyboard};
use crate::state::AppState;

/// Routes mounted at `/storyboards`.
///
/// ```text
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update
/// DELETE /{id}                      -> delete (409 while occupied)
///
/// GET    /{storyboard_id}/shots     -> list_by_storyboard
/// POST   /{storyboard_id}/shots     -> create_for_storyboard
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(storyboard::get_by_id)
                .put(storyboard::update)
                .delete(storyboard::delete),
        )
        .route(
            "/{storyboard_id}/shots",
            get(shot::list_by_storyboard).post(shot::create_for_storyboard),
        )
}
