//! Prompt builders and response shapes for LLM-assisted script authoring.
//!
//! Each builder returns `(system_prompt, user_prompt)` pairs for the chat
//! providers. Every prompt ends with an explicit JSON output contract;
//! [`parse_json_array`] decodes the model's reply, tolerating a markdown
//! code fence around the payload. An unparseable reply is reported to the
//! caller as a provider failure, never persisted partially.

use serde::Deserialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// One episode entry from an outline generation reply.
#[derive(Debug, Clone, Deserialize)]
pub struct OutlineEntry {
    pub episode: i32,
    pub title: String,
    pub synopsis: String,
}

/// One character profile from a character generation reply.
#[derive(Debug, Clone, Deserialize)]
pub struct CharacterProfile {
    pub name: String,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub personality: Option<String>,
    #[serde(default)]
    pub appearance: Option<String>,
    #[serde(default)]
    pub background: Option<String>,
}

/// One scene profile from a scene generation reply.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneProfile {
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub time_of_day: Option<String>,
    #[serde(default)]
    pub atmosphere: Option<String>,
}

/// One shot plan from a storyboarding reply.
#[derive(Debug, Clone, Deserialize)]
pub struct ShotPlan {
    pub shot_number: i32,
    #[serde(default)]
    pub shot_type: Option<String>,
    #[serde(default)]
    pub shot_description: Option<String>,
    #[serde(default)]
    pub video_prompt: Option<String>,
    /// Character name as written by the model; resolved to an ID upstream.
    #[serde(default)]
    pub character: Option<String>,
    /// Scene name as written by the model; resolved to an ID upstream.
    #[serde(default)]
    pub scene: Option<String>,
}

// ---------------------------------------------------------------------------
// Prompt builders
// ---------------------------------------------------------------------------

/// Camera framings the storyboarding prompt offers the model.
pub const SHOT_TYPES: &[&str] = &[
    "extreme wide",
    "wide",
    "full",
    "medium wide",
    "medium",
    "medium close-up",
    "close-up",
    "extreme close-up",
    "point-of-view",
    "two-shot",
];

/// Prompt for a per-episode series outline.
pub fn outline_prompt(
    description: &str,
    total_episodes: i32,
    characters: &str,
    scenes: &str,
) -> (String, String) {
    let system =
        "You are a professional short-drama screenwriter. Produce a series outline from the \
         information provided."
            .to_string();
    let user = format!(
        "Write an outline for a {total_episodes}-episode short drama.\n\n\
         Series synopsis: {description}\n\n\
         Characters:\n{characters}\n\n\
         Scenes:\n{scenes}\n\n\
         For every episode provide:\n\
         1. An episode title\n\
         2. An episode synopsis (100-200 words)\n\n\
         Reply with a JSON array only, in this form:\n\
         [{{\"episode\": 1, \"title\": \"...\", \"synopsis\": \"...\"}}, ...]"
    );
    (system, user)
}

/// Prompt for main character profiles.
pub fn characters_prompt(description: &str, total_episodes: i32) -> (String, String) {
    let system = "You are a professional short-drama screenwriter.".to_string();
    let user = format!(
        "Create the main cast for this short drama.\n\n\
         Series synopsis: {description}\n\
         Episode count: {total_episodes}\n\n\
         Create 3-6 main characters. For each one provide:\n\
         1. Name\n\
         2. Age\n\
         3. Personality\n\
         4. Appearance\n\
         5. Background\n\n\
         Reply with a JSON array only, in this form:\n\
         [{{\"name\": \"...\", \"age\": \"...\", \"personality\": \"...\", \
         \"appearance\": \"...\", \"background\": \"...\"}}, ...]"
    );
    (system, user)
}

/// Prompt for recurring scene (location) profiles.
pub fn scenes_prompt(description: &str, total_episodes: i32) -> (String, String) {
    let system = "You are a professional short-drama screenwriter.".to_string();
    let user = format!(
        "Create the recurring scenes for this short drama.\n\n\
         Series synopsis: {description}\n\
         Episode count: {total_episodes}\n\n\
         Create 3-8 scenes. For each one provide:\n\
         1. Scene name\n\
         2. Location description\n\
         3. Time of day (morning/afternoon/evening/night/dawn/dusk)\n\
         4. Atmosphere\n\n\
         Reply with a JSON array only, in this form:\n\
         [{{\"name\": \"...\", \"location\": \"...\", \"time_of_day\": \"...\", \
         \"atmosphere\": \"...\"}}, ...]"
    );
    (system, user)
}

/// Prompt turning a dialogue script into camera-level shot plans.
pub fn shots_prompt(dialogue_text: &str, characters: &str, scenes: &str) -> (String, String) {
    let system = "You are a professional storyboard artist for short vertical dramas.".to_string();
    let user = format!(
        "Break the following dialogue script into shots.\n\n\
         Dialogue:\n{dialogue_text}\n\n\
         Characters:\n{characters}\n\n\
         Scenes:\n{scenes}\n\n\
         For each shot provide:\n\
         1. Shot number\n\
         2. Shot type (one of: {shot_types})\n\
         3. Shot description\n\
         4. Video prompt (for an AI video generator)\n\
         5. Featured character name\n\
         6. Scene name\n\n\
         Reply with a JSON array only, in this form:\n\
         [{{\"shot_number\": 1, \"shot_type\": \"medium\", \"shot_description\": \"...\", \
         \"video_prompt\": \"...\", \"character\": \"...\", \"scene\": \"...\"}}, ...]",
        shot_types = SHOT_TYPES.join("/"),
    );
    (system, user)
}

// ---------------------------------------------------------------------------
// Reply parsing
// ---------------------------------------------------------------------------

/// Strip an optional markdown code fence (```json ... ``` or ``` ... ```)
/// from a model reply and return the inner payload.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") up to the first newline.
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    rest.trim_end_matches('`').trim()
}

/// Decode a JSON array reply into typed entries.
///
/// Accepts the array bare or wrapped in a markdown code fence. Any other
/// shape is a provider failure carrying the decode diagnostic.
pub fn parse_json_array<T: serde::de::DeserializeOwned>(raw: &str) -> Result<Vec<T>, CoreError> {
    let payload = strip_code_fence(raw);
    serde_json::from_str(payload)
        .map_err(|e| CoreError::Provider(format!("unparseable model reply: {e}")))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_array() {
        let entries: Vec<OutlineEntry> = parse_json_array(
            r#"[{"episode": 1, "title": "Pilot", "synopsis": "An opening."}]"#,
        )
        .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].episode, 1);
        assert_eq!(entries[0].title, "Pilot");
    }

    #[test]
    fn parses_fenced_array() {
        let raw = "```json\n[{\"name\": \"Mara\"}]\n```";
        let entries: Vec<CharacterProfile> = parse_json_array(raw).unwrap();
        assert_eq!(entries[0].name, "Mara");
        assert!(entries[0].age.is_none());
    }

    #[test]
    fn parses_fence_without_info_string() {
        let raw = "```\n[{\"name\": \"Rooftop\", \"time_of_day\": \"dusk\"}]\n```";
        let entries: Vec<SceneProfile> = parse_json_array(raw).unwrap();
        assert_eq!(entries[0].time_of_day.as_deref(), Some("dusk"));
    }

    #[test]
    fn rejects_non_json_reply() {
        let result: Result<Vec<OutlineEntry>, _> = parse_json_array("Sorry, I cannot do that.");
        assert!(result.is_err());
    }

    #[test]
    fn rejects_object_reply() {
        let result: Result<Vec<ShotPlan>, _> = parse_json_array(r#"{"shot_number": 1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn shot_plan_tolerates_missing_optionals() {
        let entries: Vec<ShotPlan> = parse_json_array(r#"[{"shot_number": 2}]"#).unwrap();
        assert_eq!(entries[0].shot_number, 2);
        assert!(entries[0].character.is_none());
    }

    #[test]
    fn outline_prompt_carries_contract() {
        let (system, user) = outline_prompt("A revenge tale.", 12, "Mara", "Rooftop");
        assert!(system.contains("screenwriter"));
        assert!(user.contains("12-episode"));
        assert!(user.contains("JSON array"));
    }

    #[test]
    fn shots_prompt_lists_shot_types() {
        let (_, user) = shots_prompt("MARA: Run.", "Mara", "Rooftop");
        for shot_type in SHOT_TYPES {
            assert!(user.contains(shot_type), "missing {shot_type}");
        }
    }
}
