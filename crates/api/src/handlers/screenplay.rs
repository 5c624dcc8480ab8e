//! Handlers that call the text-generation provider: prose conversion,
//! rubric scoring and summaries.
//!
//! Input is validated before any provider call. Provider failures surface as
//! 502 `UPSTREAM_ERROR`; a completion that only partially follows the rubric
//! format is still a 200 with the missing criteria set to `null`.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use storyforge_core::error::CoreError;
use storyforge_core::rubric::{extract_default_scores, RubricScore};
use storyforge_core::screenplay::{parse_tagged, speaking_characters, ScreenplayElement};
use storyforge_core::types::DbId;
use storyforge_core::validation::validate_screenplay_text;
use storyforge_db::repositories::SceneVersionRepo;
use storyforge_llm::prompts;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::handlers::scene::require_owned_scene;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /screenplay/convert`.
///
/// The prose is read from `text`; `text-content` is accepted as an alias.
#[derive(Debug, Deserialize)]
pub struct ConvertRequest {
    #[serde(alias = "text-content")]
    pub text: String,
}

/// Request body for `POST /screenplay/score` and `POST /screenplay/summarize`.
#[derive(Debug, Deserialize)]
pub struct ScreenplayRequest {
    pub screenplay: String,
}

#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    /// Tagged screenplay text exactly as the model produced it.
    pub screenplay: String,
    pub elements: Vec<ScreenplayElement>,
    /// Speaking characters in order of first appearance.
    pub characters: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub scores: RubricScore,
}

#[derive(Debug, Serialize)]
pub struct SceneScoreResponse {
    pub scene_id: DbId,
    /// The version whose content was scored.
    pub version_number: i32,
    pub scores: RubricScore,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/screenplay/convert
pub async fn convert(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppJson(input): AppJson<ConvertRequest>,
) -> AppResult<Json<ConvertResponse>> {
    validate_screenplay_text("Text", &input.text)?;

    let screenplay = state
        .llm
        .generate(&prompts::convert_request(&input.text))
        .await?;
    let elements = parse_tagged(&screenplay);
    let characters = speaking_characters(&elements);

    tracing::info!(
        user_id = auth_user.user_id,
        elements = elements.len(),
        "Converted prose to screenplay"
    );
    Ok(Json(ConvertResponse {
        screenplay,
        elements,
        characters,
    }))
}

/// POST /api/v1/screenplay/score
pub async fn score(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppJson(input): AppJson<ScreenplayRequest>,
) -> AppResult<Json<ScoreResponse>> {
    validate_screenplay_text("Screenplay", &input.screenplay)?;
    let scores = score_text(&state, &input.screenplay).await?;
    tracing::info!(
        user_id = auth_user.user_id,
        scored = scores.scored_count(),
        "Scored screenplay"
    );
    Ok(Json(ScoreResponse { scores }))
}

/// POST /api/v1/screenplay/summarize
pub async fn summarize(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppJson(input): AppJson<ScreenplayRequest>,
) -> AppResult<Json<SummaryResponse>> {
    validate_screenplay_text("Screenplay", &input.screenplay)?;
    let summary = state
        .llm
        .generate(&prompts::summarize_request(&input.screenplay))
        .await?;
    tracing::debug!(user_id = auth_user.user_id, "Summarized screenplay");
    Ok(Json(SummaryResponse { summary }))
}

/// POST /api/v1/scenes/{id}/score
///
/// Scores the content of the scene's current version.
pub async fn score_scene(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<SceneScoreResponse>> {
    require_owned_scene(&state, id, auth_user.user_id).await?;
    let current = SceneVersionRepo::get_current(&state.pool, id)
        .await?
        .ok_or(CoreError::Validation(
            "Scene has no content to score".into(),
        ))?;
    validate_screenplay_text("Scene content", &current.content)?;

    let scores = score_text(&state, &current.content).await?;
    tracing::info!(
        scene_id = id,
        version_number = current.version_number,
        scored = scores.scored_count(),
        "Scored scene"
    );
    Ok(Json(SceneScoreResponse {
        scene_id: id,
        version_number: current.version_number,
        scores,
    }))
}

async fn score_text(state: &AppState, screenplay: &str) -> AppResult<RubricScore> {
    let raw = state
        .llm
        .generate(&prompts::score_request(screenplay))
        .await?;
    Ok(extract_default_scores(&raw))
}
