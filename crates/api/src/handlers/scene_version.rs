//! Handlers for scene version history.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use storyforge_core::error::CoreError;
use storyforge_core::types::DbId;
use storyforge_db::models::scene_version::SceneVersion;
use storyforge_db::repositories::SceneVersionRepo;

use crate::error::{AppError, AppResult};
use crate::extract::AppPath;
use crate::handlers::scene::{require_owned_scene, SceneWithVersion};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

fn version_not_found(scene_id: DbId, version_number: i32) -> AppError {
    AppError::NotFound(format!(
        "Version {version_number} of scene {scene_id} not found"
    ))
}

/// GET /api/v1/scenes/{scene_id}/versions
///
/// Full history, oldest first.
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(scene_id): AppPath<DbId>,
) -> AppResult<Json<Vec<SceneVersion>>> {
    require_owned_scene(&state, scene_id, auth_user.user_id).await?;
    let versions = SceneVersionRepo::list_versions(&state.pool, scene_id).await?;
    Ok(Json(versions))
}

/// GET /api/v1/scenes/{scene_id}/versions/current
pub async fn current(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(scene_id): AppPath<DbId>,
) -> AppResult<Json<SceneVersion>> {
    require_owned_scene(&state, scene_id, auth_user.user_id).await?;
    let version = SceneVersionRepo::get_current(&state.pool, scene_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Current version of scene",
            id: scene_id,
        }))?;
    Ok(Json(version))
}

/// GET /api/v1/scenes/{scene_id}/versions/{number}
pub async fn get_by_number(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath((scene_id, number)): AppPath<(DbId, i32)>,
) -> AppResult<Json<SceneVersion>> {
    require_owned_scene(&state, scene_id, auth_user.user_id).await?;
    let version = SceneVersionRepo::find_by_number(&state.pool, scene_id, number)
        .await?
        .ok_or_else(|| version_not_found(scene_id, number))?;
    Ok(Json(version))
}

/// POST /api/v1/scenes/{scene_id}/versions/{number}/restore
///
/// Appends a copy of version `number` as the newest version.
pub async fn restore(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath((scene_id, number)): AppPath<(DbId, i32)>,
) -> AppResult<(StatusCode, Json<SceneWithVersion>)> {
    require_owned_scene(&state, scene_id, auth_user.user_id).await?;
    let (scene, version) = SceneVersionRepo::restore_version(&state.pool, scene_id, number)
        .await?
        .ok_or_else(|| version_not_found(scene_id, number))?;
    Ok((StatusCode::CREATED, Json(SceneWithVersion { scene, version })))
}
