//! Route definitions for the `/characters` resource.
//!
//! List/create live under `/projects/{project_id}/characters`; only the
//! item routes are mounted here.

use axum::routing::get;
use axum::Router;

use crate::handlers::character;
use crate::state::AppState;

/// Routes mounted at `/characters`.
///
/// ```text
/// GET    /{id}     -> get_by_id
/// PUT    /{id}     -> update
/// DELETE /{id}     -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(character::get_by_id)
            .put(character::update)
            .delete(character::delete),
    )
}
