//! Story entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storyforge_core::types::{DbId, Timestamp};

/// A row from the `stories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Story {
    pub id: DbId,
    pub owner_id: DbId,
    pub title: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new story. The owner comes from the authenticated user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStory {
    pub title: String,
}

/// DTO for updating a story. All fields optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStory {
    pub title: Option<String>,
}
