//! Scene (location) entity model and DTOs.

use playlet_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A recurring location row from the `scenes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Scene {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub background_path: Option<String>,
    pub location: Option<String>,
    pub time_of_day: Option<String>,
    pub atmosphere: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new scene.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScene {
    pub name: String,
    pub description: Option<String>,
    pub background_path: Option<String>,
    pub location: Option<String>,
    pub time_of_day: Option<String>,
    pub atmosphere: Option<String>,
}

/// DTO for updating an existing scene. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateScene {
    pub name: Option<String>,
    pub description: Option<String>,
    pub background_path: Option<String>,
    pub location: Option<String>,
    pub time_of_day: Option<String>,
    pub atmosphere: Option<String>,
}
