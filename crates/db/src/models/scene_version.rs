//! Scene version entity model.

use serde::Serialize;
use sqlx::FromRow;
use storyforge_core::types::{DbId, Timestamp};

/// An immutable row from the `scene_versions` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct SceneVersion {
    pub id: DbId,
    pub scene_id: DbId,
    pub version_number: i32,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
}
