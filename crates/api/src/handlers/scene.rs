//! Handlers for scenes: creation under a story, reads, edits and deletion.
//!
//! Creating a scene records version 1; every accepted edit appends the next
//! version through [`SceneVersionRepo::edit`].

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use storyforge_core::error::CoreError;
use storyforge_core::types::DbId;
use storyforge_core::validation::{validate_content, validate_title};
use storyforge_db::models::scene::{CreateScene, Scene, UpdateScene};
use storyforge_db::models::scene_version::SceneVersion;
use storyforge_db::repositories::{SceneRepo, SceneVersionRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::handlers::story::require_owned_story;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// A scene together with the version produced by the write that returned it.
#[derive(Debug, Serialize)]
pub struct SceneWithVersion {
    pub scene: Scene,
    pub version: SceneVersion,
}

pub(crate) fn scene_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Scene", id })
}

/// Load a scene whose story the caller owns, or fail with 404.
pub(crate) async fn require_owned_scene(
    state: &AppState,
    id: DbId,
    owner_id: DbId,
) -> AppResult<Scene> {
    SceneRepo::find_owned(&state.pool, id, owner_id)
        .await?
        .ok_or_else(|| scene_not_found(id))
}

/// POST /api/v1/stories/{story_id}/scenes
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(story_id): AppPath<DbId>,
    AppJson(input): AppJson<CreateScene>,
) -> AppResult<(StatusCode, Json<SceneWithVersion>)> {
    validate_title("Scene title", &input.title)?;
    validate_content(&input.content)?;
    require_owned_story(&state, story_id, auth_user.user_id).await?;

    let (scene, version) =
        SceneRepo::create_with_initial_version(&state.pool, story_id, &input).await?;
    Ok((StatusCode::CREATED, Json(SceneWithVersion { scene, version })))
}

/// GET /api/v1/stories/{story_id}/scenes
pub async fn list_by_story(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(story_id): AppPath<DbId>,
) -> AppResult<Json<Vec<Scene>>> {
    require_owned_story(&state, story_id, auth_user.user_id).await?;
    let scenes = SceneRepo::list_by_story(&state.pool, story_id).await?;
    Ok(Json(scenes))
}

/// GET /api/v1/scenes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Scene>> {
    let scene = require_owned_scene(&state, id, auth_user.user_id).await?;
    Ok(Json(scene))
}

/// PUT | PATCH /api/v1/scenes/{id}
///
/// Omitted fields keep their current value. Each accepted edit appends a
/// new version and makes it current.
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateScene>,
) -> AppResult<Json<SceneWithVersion>> {
    if input.title.is_none() && input.content.is_none() {
        return Err(AppError::Core(CoreError::Validation(
            "At least one of title or content must be provided".into(),
        )));
    }
    if let Some(title) = &input.title {
        validate_title("Scene title", title)?;
    }
    if let Some(content) = &input.content {
        validate_content(content)?;
    }
    require_owned_scene(&state, id, auth_user.user_id).await?;

    let (scene, version) = SceneVersionRepo::edit(&state.pool, id, &input)
        .await?
        .ok_or_else(|| scene_not_found(id))?;
    Ok(Json(SceneWithVersion { scene, version }))
}

/// DELETE /api/v1/scenes/{id}
///
/// Removes the scene and its version history.
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    require_owned_scene(&state, id, auth_user.user_id).await?;
    if SceneRepo::delete(&state.pool, id).await? {
        tracing::info!(scene_id = id, "Scene deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(scene_not_found(id))
    }
}
