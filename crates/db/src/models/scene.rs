//! Scene entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storyforge_core::types::{DbId, Timestamp};

/// A row from the `scenes` table.
///
/// `title` and `content` mirror the snapshot held by `current_version_id`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Scene {
    pub id: DbId,
    pub story_id: DbId,
    pub title: String,
    pub content: Option<String>,
    pub current_version_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a scene; becomes version 1.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScene {
    pub title: String,
    pub content: String,
}

/// DTO for editing a scene. Omitted fields keep their current value; every
/// accepted edit appends a new version.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateScene {
    pub title: Option<String>,
    pub content: Option<String>,
}
