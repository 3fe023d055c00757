//! HTTP-level integration tests for the generation lifecycle endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without a TCP listener. External providers are replaced by in-process
//! stubs wired through the provider traits, so the full claim/settle
//! path runs against a real database with deterministic provider
//! outcomes.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json, StubSpeech, StubVideo};
use sqlx::PgPool;

use playlet_core::generation::GenerationKind;
use playlet_db::models::episode::CreateEpisode;
use playlet_db::models::project::CreateProject;
use playlet_db::models::shot::{CreateShot, Shot};
use playlet_db::repositories::{EpisodeRepo, ProjectRepo, ShotRepo, StoryboardRepo};

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

/// Create a project -> episode -> default board -> shot chain.
async fn seed_shot(pool: &PgPool, description: Option<&str>) -> Shot {
    let project = ProjectRepo::create(
        pool,
        &CreateProject {
            name: "Generation".to_string(),
            description: None,
            cover_image_path: None,
            total_episodes: None,
            default_voice_id: None,
            status_id: None,
        },
    )
    .await
    .unwrap();

    let episode = EpisodeRepo::create(
        pool,
        project.id,
        &CreateEpisode {
            episode_number: 1,
            title: None,
            synopsis: None,
            status_id: None,
        },
    )
    .await
    .unwrap();

    let board = StoryboardRepo::find_or_create_default(pool, episode.id)
        .await
        .unwrap();

    ShotRepo::create(
        pool,
        &CreateShot {
            episode_id: episode.id,
            storyboard_id: board.id,
            shot_number: 1,
            shot_type: None,
            camera_movement: None,
            shot_description: description.map(str::to_string),
            dialogue_text: None,
            video_prompt: None,
            character_id: None,
            character_ids: None,
            scene_id: None,
            character_image: None,
            scene_image: None,
            duration_secs: None,
        },
    )
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Speech preconditions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_speech_without_text_or_description_is_missing_input(pool: PgPool) {
    let shot = seed_shot(&pool, None).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/shots/{}/generate/speech", shot.id),
        serde_json::json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "MISSING_INPUT");

    // Precondition failures never mutate unit state.
    let app = common::build_test_app(pool);
    let status = body_json(get(app, &format!("/api/v1/shots/{}/status", shot.id)).await).await;
    assert_eq!(status["data"]["status"], "not_started");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_speech_success_writes_audio_artifact(pool: PgPool) {
    let shot = seed_shot(&pool, Some("Hello world")).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/shots/{}/generate/speech", shot.id),
        serde_json::json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status_id"], 3);
    assert_eq!(json["data"]["tts_audio_path"], "/uploads/audio/tts_1.mp3");
    assert!(json["data"]["video_path"].is_null());
    assert!(json["data"]["lipsync_video_path"].is_null());

    let app = common::build_test_app(pool);
    let status = body_json(get(app, &format!("/api/v1/shots/{}/status", shot.id)).await).await;
    assert_eq!(status["data"]["status"], "completed");
    assert_eq!(status["data"]["tts_audio_path"], "/uploads/audio/tts_1.mp3");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_speech_explicit_text_overrides_missing_description(pool: PgPool) {
    let shot = seed_shot(&pool, None).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/shots/{}/generate/speech", shot.id),
        serde_json::json!({ "text": "Run, Mara!" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_speech_without_configured_provider_fails_without_claiming(pool: PgPool) {
    let shot = seed_shot(&pool, Some("Hello world")).await;

    let app = common::build_app(common::test_state(
        pool.clone(),
        None,
        None, // no speech provider configured
        Arc::new(StubVideo { artifact: None }),
    ));
    let response = post_json(
        app,
        &format!("/api/v1/shots/{}/generate/speech", shot.id),
        serde_json::json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    // The shot was never claimed.
    let shot = ShotRepo::find_by_id(&pool, shot.id).await.unwrap().unwrap();
    assert_eq!(shot.status_id, 1);
}

// ---------------------------------------------------------------------------
// Conflict on concurrent attempts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_second_attempt_while_in_flight_conflicts(pool: PgPool) {
    let shot = seed_shot(&pool, Some("Hello world")).await;

    // Simulate an in-flight attempt holding the claim.
    ShotRepo::claim_for_generation(&pool, shot.id)
        .await
        .unwrap()
        .unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/shots/{}/generate/speech", shot.id),
        serde_json::json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");

    // The in-flight attempt's state is untouched.
    let current = ShotRepo::find_by_id(&pool, shot.id).await.unwrap().unwrap();
    assert_eq!(current.status_id, 2);
    assert!(current.tts_audio_path.is_none());
}

// ---------------------------------------------------------------------------
// Video preconditions and success
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_video_without_reference_images_is_missing_input(pool: PgPool) {
    let shot = seed_shot(&pool, Some("Mara at the door")).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/shots/{}/generate/video", shot.id),
        serde_json::json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "MISSING_INPUT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_video_success_writes_video_artifact_only(pool: PgPool) {
    let shot = seed_shot(&pool, Some("Mara at the door")).await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/shots/{}", shot.id),
        serde_json::json!({
            "character_image": "/uploads/1/images/mara.png",
            "scene_image": "/uploads/1/images/rooftop.png",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/shots/{}/generate/video", shot.id),
        serde_json::json!({ "prompt": "slow dolly in" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status_id"], 3);
    assert_eq!(
        json["data"]["video_path"],
        "http://localhost:8188/view?filename=wan_00012.mp4&type=output"
    );
    assert!(json["data"]["tts_audio_path"].is_null());
}

// ---------------------------------------------------------------------------
// Lip-sync preconditions and chaining
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lip_sync_requires_prior_speech_artifact(pool: PgPool) {
    let shot = seed_shot(&pool, Some("Mara speaks")).await;

    // Character image present, but no speech artifact yet.
    let app = common::build_test_app(pool.clone());
    put_json(
        app,
        &format!("/api/v1/shots/{}", shot.id),
        serde_json::json!({ "character_image": "/uploads/1/images/mara.png" }),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/shots/{}/generate/lip-sync", shot.id),
        serde_json::json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "MISSING_INPUT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lip_sync_after_speech_writes_lipsync_artifact(pool: PgPool) {
    let shot = seed_shot(&pool, Some("Mara speaks")).await;

    let app = common::build_test_app(pool.clone());
    put_json(
        app,
        &format!("/api/v1/shots/{}", shot.id),
        serde_json::json!({ "character_image": "/uploads/1/images/mara.png" }),
    )
    .await;

    // Produce the speech artifact first.
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/shots/{}/generate/speech", shot.id),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/shots/{}/generate/lip-sync", shot.id),
        serde_json::json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status_id"], 3);
    assert_eq!(json["data"]["tts_audio_path"], "/uploads/audio/tts_1.mp3");
    assert_eq!(
        json["data"]["lipsync_video_path"],
        "http://localhost:8188/view?filename=wan_00012.mp4&type=output"
    );
}

// ---------------------------------------------------------------------------
// Provider failure and retry
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_provider_failure_marks_shot_failed(pool: PgPool) {
    let shot = seed_shot(&pool, Some("Hello world")).await;

    let app = common::build_app(common::test_state(
        pool.clone(),
        None,
        Some(Arc::new(StubSpeech { artifact: None })),
        Arc::new(StubVideo { artifact: None }),
    ));
    let response = post_json(
        app,
        &format!("/api/v1/shots/{}/generate/speech", shot.id),
        serde_json::json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "PROVIDER_FAILURE");

    // Never left in_progress: the failure settled the shot.
    let current = ShotRepo::find_by_id(&pool, shot.id).await.unwrap().unwrap();
    assert_eq!(current.status_id, 4);
    assert!(current.tts_audio_path.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_shot_can_be_retried_to_success(pool: PgPool) {
    let shot = seed_shot(&pool, Some("Hello world")).await;

    let failing = common::build_app(common::test_state(
        pool.clone(),
        None,
        Some(Arc::new(StubSpeech { artifact: None })),
        Arc::new(StubVideo { artifact: None }),
    ));
    let response = post_json(
        failing,
        &format!("/api/v1/shots/{}/generate/speech", shot.id),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/shots/{}/generate/speech", shot.id),
        serde_json::json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status_id"], 3);
    assert_eq!(json["data"]["tts_audio_path"], "/uploads/audio/tts_1.mp3");
}

// ---------------------------------------------------------------------------
// Status polling
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_status_poll_is_side_effect_free(pool: PgPool) {
    let shot = seed_shot(&pool, Some("Hello world")).await;

    let app = common::build_test_app(pool.clone());
    let first = body_json(get(app, &format!("/api/v1/shots/{}/status", shot.id)).await).await;

    let app = common::build_test_app(pool.clone());
    let second = body_json(get(app, &format!("/api/v1/shots/{}/status", shot.id)).await).await;

    assert_eq!(first, second);
    assert_eq!(first["data"]["status"], "not_started");

    let current = ShotRepo::find_by_id(&pool, shot.id).await.unwrap().unwrap();
    assert_eq!(current.status_id, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_status_of_unknown_shot_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/shots/999999/status").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_generate_on_unknown_shot_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/shots/999999/generate/speech",
        serde_json::json!({ "text": "anyone there?" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Settled artifacts survive authoring edits and deletes are guarded
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_authoring_edit_does_not_revert_generation(pool: PgPool) {
    let shot = seed_shot(&pool, Some("Hello world")).await;

    ShotRepo::claim_for_generation(&pool, shot.id)
        .await
        .unwrap()
        .unwrap();
    ShotRepo::complete_generation(
        &pool,
        shot.id,
        GenerationKind::Speech,
        "/uploads/audio/tts_1.mp3",
    )
    .await
    .unwrap()
    .unwrap();

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/shots/{}", shot.id),
        serde_json::json!({ "shot_description": "Mara hesitates" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let status = body_json(get(app, &format!("/api/v1/shots/{}/status", shot.id)).await).await;
    assert_eq!(status["data"]["status"], "completed");
    assert_eq!(status["data"]["tts_audio_path"], "/uploads/audio/tts_1.mp3");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_occupied_storyboard_delete_conflicts(pool: PgPool) {
    let shot = seed_shot(&pool, None).await;

    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/api/v1/storyboards/{}", shot.storyboard_id)).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}
