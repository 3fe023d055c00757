//! Request handlers.
//!
//! Each submodule provides async handler functions for a single resource.
//! Handlers delegate to the corresponding repository in `playlet_db` and
//! map errors via [`crate::error::AppError`]. Generation and script
//! handlers additionally drive the external provider clients.

pub mod character;
pub mod episode;
pub mod generation;
pub mod project;
pub mod scene;
pub mod script;
pub mod shot;
pub mod storyboard;
