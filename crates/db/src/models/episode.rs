//! Episode entity model and DTOs.

use playlet_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::status::StatusId;

/// An episode row from the `episodes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Episode {
    pub id: DbId,
    pub project_id: DbId,
    pub episode_number: i32,
    pub title: Option<String>,
    pub synopsis: Option<String>,
    pub status_id: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new episode.
///
/// `episode_number` is unique within the project
/// (`uq_episodes_project_number`); a duplicate is rejected with 409.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEpisode {
    pub episode_number: i32,
    pub title: Option<String>,
    pub synopsis: Option<String>,
    /// Defaults to 1 (Planned) if omitted.
    pub status_id: Option<StatusId>,
}

/// DTO for updating an existing episode. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEpisode {
    pub episode_number: Option<i32>,
    pub title: Option<String>,
    pub synopsis: Option<String>,
    pub status_id: Option<StatusId>,
}
