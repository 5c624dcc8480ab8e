//! Handlers for the `/stories` resource.
//!
//! Every operation is scoped to the authenticated owner; another user's story
//! is reported as not found.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use storyforge_core::error::CoreError;
use storyforge_core::types::DbId;
use storyforge_core::validation::validate_title;
use storyforge_db::models::story::{CreateStory, Story, UpdateStory};
use storyforge_db::repositories::StoryRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

fn story_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Story", id })
}

/// Load a story the caller owns, or fail with 404.
pub(crate) async fn require_owned_story(
    state: &AppState,
    id: DbId,
    owner_id: DbId,
) -> AppResult<Story> {
    StoryRepo::find_owned(&state.pool, id, owner_id)
        .await?
        .ok_or_else(|| story_not_found(id))
}

/// POST /api/v1/stories
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppJson(input): AppJson<CreateStory>,
) -> AppResult<(StatusCode, Json<Story>)> {
    validate_title("Story title", &input.title)?;
    let story = StoryRepo::create(&state.pool, auth_user.user_id, &input).await?;
    tracing::info!(story_id = story.id, owner_id = story.owner_id, "Story created");
    Ok((StatusCode::CREATED, Json(story)))
}

/// GET /api/v1/stories
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<Vec<Story>>> {
    let stories = StoryRepo::list_by_owner(&state.pool, auth_user.user_id).await?;
    Ok(Json(stories))
}

/// GET /api/v1/stories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Story>> {
    let story = require_owned_story(&state, id, auth_user.user_id).await?;
    Ok(Json(story))
}

/// PUT /api/v1/stories/{id}
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateStory>,
) -> AppResult<Json<Story>> {
    if let Some(title) = &input.title {
        validate_title("Story title", title)?;
    }
    let story = StoryRepo::update(&state.pool, id, auth_user.user_id, &input)
        .await?
        .ok_or_else(|| story_not_found(id))?;
    Ok(Json(story))
}

/// DELETE /api/v1/stories/{id}
///
/// Removes the story together with its scenes and their version history.
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    let deleted = StoryRepo::delete(&state.pool, id, auth_user.user_id).await?;
    if deleted {
        tracing::info!(story_id = id, "Story deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(story_not_found(id))
    }
}
