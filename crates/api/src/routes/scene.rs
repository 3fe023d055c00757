//! Route definitions for the `/scenes` resource.
//!
//! List/create live under `/projects/{project_id}/scenes`; only the item
//! routes are mounted here.

use axum::routing::get;
use axum::Router;

use crate::handlers::scene;
use crate::state::AppState;

/// Routes mounted at `/scenes`.
///
/// ```text
/// GET    /{id}     -> get_by_id
/// PUT    /{id}     -> update
/// DELETE /{id}     -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(scene::get_by_id)
            .put(scene::update)
            .delete(scene::delete),
    )
}
