//! LLM-assisted script authoring handlers.
//!
//! Routes:
//! - `POST /projects/{id}/generate/characters` — propose and persist cast
//! - `POST /projects/{id}/generate/scenes`     — propose and persist scenes
//! - `POST /projects/{id}/generate/outline`    — per-episode outline
//! - `POST /episodes/{id}/generate/shots`      — storyboard a dialogue script
//!
//! Each handler builds a prompt from the project's persisted context,
//! dispatches it through the configured chat provider, parses the JSON
//! reply, and persists the results. An unparseable reply is a provider
//! failure; nothing is persisted from it.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use playlet_core::error::CoreError;
use playlet_core::generation::{ChatProvider, ChatRequest};
use playlet_core::script::{self, CharacterProfile, OutlineEntry, SceneProfile, ShotPlan};
use playlet_core::types::DbId;
use playlet_db::models::character::{Character, CreateCharacter};
use playlet_db::models::episode::{CreateEpisode, Episode};
use playlet_db::models::project::Project;
use playlet_db::models::scene::{CreateScene, Scene};
use playlet_db::models::shot::{CreateShot, Shot};
use playlet_db::repositories::{
    CharacterRepo, EpisodeRepo, ProjectRepo, SceneRepo, ShotRepo, StoryboardRepo,
};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for storyboarding an episode's dialogue.
#[derive(Debug, Deserialize)]
pub struct GenerateShotsRequest {
    pub dialogue_text: String,
}

/// Outline generation result: created episodes plus the numbers skipped
/// because they already existed (or were invalid).
#[derive(Debug, Serialize)]
pub struct OutlineResponse {
    pub created: Vec<Episode>,
    pub skipped: Vec<i32>,
}

/// One shot plan that could not be persisted.
#[derive(Debug, Serialize)]
pub struct ShotPlanError {
    pub shot_number: i32,
    pub error: String,
}

/// Storyboarding result: created shots plus per-plan errors.
#[derive(Debug, Serialize)]
pub struct GenerateShotsResponse {
    pub created: Vec<Shot>,
    pub errors: Vec<ShotPlanError>,
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Load a project or fail with 404.
async fn load_project(state: &AppState, id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
}

/// The project description drives every prompt; a project without one
/// cannot be expanded.
fn require_description(project: &Project) -> AppResult<String> {
    project
        .description
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            AppError::Core(CoreError::MissingInput(
                "project has no description to generate from".to_string(),
            ))
        })
}

/// The configured chat provider, or a provider failure when none is.
fn require_chat(state: &AppState) -> AppResult<std::sync::Arc<dyn ChatProvider>> {
    state.chat.clone().ok_or(AppError::Core(CoreError::Provider(
        "text-generation provider not configured".to_string(),
    )))
}

/// Dispatch a prompt and return the raw reply text.
async fn complete(
    chat: &dyn ChatProvider,
    system: String,
    prompt: String,
) -> AppResult<String> {
    chat.complete(ChatRequest {
        system: Some(system),
        prompt,
        temperature: None,
    })
    .await
    .map_err(|e| AppError::Core(CoreError::Provider(e.to_string())))
}

/// Render the cast as prompt context, one line per character.
fn character_sheet(characters: &[Character]) -> String {
    if characters.is_empty() {
        return "(none defined yet)".to_string();
    }
    characters
        .iter()
        .map(|c| match c.description.as_deref() {
            Some(desc) => format!("- {}: {desc}", c.name),
            None => format!("- {}", c.name),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the scenes as prompt context, one line per scene.
fn scene_sheet(scenes: &[Scene]) -> String {
    if scenes.is_empty() {
        return "(none defined yet)".to_string();
    }
    scenes
        .iter()
        .map(|s| match s.location.as_deref() {
            Some(location) => format!("- {}: {location}", s.name),
            None => format!("- {}", s.name),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Case-insensitive name lookup used to resolve model-written names.
fn find_by_name<'a, T>(items: &'a [T], name: &str, item_name: impl Fn(&T) -> &str) -> Option<&'a T> {
    items
        .iter()
        .find(|item| item_name(item).eq_ignore_ascii_case(name.trim()))
}

// ---------------------------------------------------------------------------
// POST /projects/{id}/generate/characters
// ---------------------------------------------------------------------------

/// Propose 3-6 main characters from the project description and persist
/// them.
pub async fn generate_characters(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let project = load_project(&state, project_id).await?;
    let description = require_description(&project)?;
    let chat = require_chat(&state)?;

    let (system, prompt) = script::characters_prompt(&description, project.total_episodes);
    let reply = complete(chat.as_ref(), system, prompt).await?;
    let profiles: Vec<CharacterProfile> =
        script::parse_json_array(&reply).map_err(AppError::Core)?;

    let mut created = Vec::new();
    for profile in profiles {
        if profile.name.trim().is_empty() {
            continue;
        }
        let input = CreateCharacter {
            name: profile.name,
            description: profile.background,
            avatar_path: None,
            traits: Some(json!({
                "age": profile.age,
                "personality": profile.personality,
                "appearance": profile.appearance,
            })),
            voice_id: None,
        };
        created.push(CharacterRepo::create(&state.pool, project_id, &input).await?);
    }

    tracing::info!(project_id, count = created.len(), "Characters generated");

    Ok(Json(DataResponse { data: created }))
}

// ---------------------------------------------------------------------------
// POST /projects/{id}/generate/scenes
// ---------------------------------------------------------------------------

/// Propose 3-8 recurring scenes from the project description and persist
/// them.
pub async fn generate_scenes(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let project = load_project(&state, project_id).await?;
    let description = require_description(&project)?;
    let chat = require_chat(&state)?;

    let (system, prompt) = script::scenes_prompt(&description, project.total_episodes);
    let reply = complete(chat.as_ref(), system, prompt).await?;
    let profiles: Vec<SceneProfile> = script::parse_json_array(&reply).map_err(AppError::Core)?;

    let mut created = Vec::new();
    for profile in profiles {
        if profile.name.trim().is_empty() {
            continue;
        }
        let input = CreateScene {
            name: profile.name,
            description: None,
            background_path: None,
            location: profile.location,
            time_of_day: profile.time_of_day,
            atmosphere: profile.atmosphere,
        };
        created.push(SceneRepo::create(&state.pool, project_id, &input).await?);
    }

    tracing::info!(project_id, count = created.len(), "Scenes generated");

    Ok(Json(DataResponse { data: created }))
}

// ---------------------------------------------------------------------------
// POST /projects/{id}/generate/outline
// ---------------------------------------------------------------------------

/// Generate per-episode titles and synopses for the whole series.
///
/// Episode numbers that already exist are skipped rather than
/// conflicting; the response reports both sets.
pub async fn generate_outline(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let project = load_project(&state, project_id).await?;
    let description = require_description(&project)?;
    let chat = require_chat(&state)?;

    let characters = CharacterRepo::list_by_project(&state.pool, project_id).await?;
    let scenes = SceneRepo::list_by_project(&state.pool, project_id).await?;

    let (system, prompt) = script::outline_prompt(
        &description,
        project.total_episodes,
        &character_sheet(&characters),
        &scene_sheet(&scenes),
    );
    let reply = complete(chat.as_ref(), system, prompt).await?;
    let entries: Vec<OutlineEntry> = script::parse_json_array(&reply).map_err(AppError::Core)?;

    let existing = EpisodeRepo::existing_numbers(&state.pool, project_id).await?;

    let mut created = Vec::new();
    let mut skipped = Vec::new();
    for entry in entries {
        if entry.episode <= 0 || existing.contains(&entry.episode) {
            skipped.push(entry.episode);
            continue;
        }
        let input = CreateEpisode {
            episode_number: entry.episode,
            title: Some(entry.title),
            synopsis: Some(entry.synopsis),
            status_id: None,
        };
        created.push(EpisodeRepo::create(&state.pool, project_id, &input).await?);
    }

    tracing::info!(
        project_id,
        created = created.len(),
        skipped = skipped.len(),
        "Outline generated"
    );

    Ok(Json(DataResponse {
        data: OutlineResponse { created, skipped },
    }))
}

// ---------------------------------------------------------------------------
// POST /episodes/{id}/generate/shots
// ---------------------------------------------------------------------------

/// Storyboard a dialogue script into shots on the episode's default
/// board.
///
/// Character and scene names written by the model are resolved to IDs by
/// case-insensitive name match; unresolved names leave the reference
/// null. Plans whose shot number is already taken are reported in
/// `errors` and the rest are still persisted.
pub async fn generate_shots(
    State(state): State<AppState>,
    Path(episode_id): Path<DbId>,
    Json(input): Json<GenerateShotsRequest>,
) -> AppResult<impl IntoResponse> {
    if input.dialogue_text.trim().is_empty() {
        return Err(AppError::Core(CoreError::MissingInput(
            "dialogue_text is required to generate shots".to_string(),
        )));
    }

    let episode = EpisodeRepo::find_by_id(&state.pool, episode_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Episode",
            id: episode_id,
        }))?;
    let chat = require_chat(&state)?;

    let characters = CharacterRepo::list_by_project(&state.pool, episode.project_id).await?;
    let scenes = SceneRepo::list_by_project(&state.pool, episode.project_id).await?;

    let (system, prompt) = script::shots_prompt(
        &input.dialogue_text,
        &character_sheet(&characters),
        &scene_sheet(&scenes),
    );
    let reply = complete(chat.as_ref(), system, prompt).await?;
    let plans: Vec<ShotPlan> = script::parse_json_array(&reply).map_err(AppError::Core)?;

    let board = StoryboardRepo::find_or_create_default(&state.pool, episode_id).await?;
    let taken: Vec<i32> = ShotRepo::list_by_storyboard(&state.pool, board.id)
        .await?
        .into_iter()
        .map(|s| s.shot_number)
        .collect();

    let mut created = Vec::new();
    let mut errors = Vec::new();
    for plan in plans {
        if plan.shot_number <= 0 {
            errors.push(ShotPlanError {
                shot_number: plan.shot_number,
                error: "shot_number must be a positive integer".to_string(),
            });
            continue;
        }
        if taken.contains(&plan.shot_number) {
            errors.push(ShotPlanError {
                shot_number: plan.shot_number,
                error: "shot_number already taken on the default board".to_string(),
            });
            continue;
        }

        let character = plan
            .character
            .as_deref()
            .and_then(|name| find_by_name(&characters, name, |c| c.name.as_str()));
        let scene = plan
            .scene
            .as_deref()
            .and_then(|name| find_by_name(&scenes, name, |s| s.name.as_str()));

        let create = CreateShot {
            episode_id,
            storyboard_id: board.id,
            shot_number: plan.shot_number,
            shot_type: plan.shot_type,
            camera_movement: None,
            shot_description: plan.shot_description,
            dialogue_text: None,
            video_prompt: plan.video_prompt,
            character_id: character.map(|c| c.id),
            character_ids: None,
            scene_id: scene.map(|s| s.id),
            character_image: character.and_then(|c| c.avatar_path.clone()),
            scene_image: scene.and_then(|s| s.background_path.clone()),
            duration_secs: None,
        };
        created.push(ShotRepo::create(&state.pool, &create).await?);
    }

    tracing::info!(
        episode_id,
        created = created.len(),
        errors = errors.len(),
        "Shots generated from dialogue"
    );

    Ok(Json(DataResponse {
        data: GenerateShotsResponse { created, errors },
    }))
}
