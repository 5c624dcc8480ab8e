//! Repository for the `stories` table.

use sqlx::PgPool;
use storyforge_core::types::DbId;

use crate::models::story::{CreateStory, Story, UpdateStory};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, title, created_at, updated_at";

/// Provides CRUD operations for stories.
///
/// Lookups that take an `owner_id` return `None` for stories owned by
/// somebody else, so callers cannot distinguish "missing" from "not yours".
pub struct StoryRepo;

impl StoryRepo {
    /// Insert a new story owned by `owner_id`.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateStory,
    ) -> Result<Story, sqlx::Error> {
        let query = format!(
            "INSERT INTO stories (owner_id, title)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(owner_id)
            .bind(input.title.trim())
            .fetch_one(pool)
            .await
    }

    /// Find a story by ID regardless of owner.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Story>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stories WHERE id = $1");
        sqlx::query_as::<_, Story>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a story by ID, restricted to its owner.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Story>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stories WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, Story>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's stories, most recently created first.
    pub async fn list_by_owner(pool: &PgPool, owner_id: DbId) -> Result<Vec<Story>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM stories WHERE owner_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Update an owned story. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        input: &UpdateStory,
    ) -> Result<Option<Story>, sqlx::Error> {
        let query = format!(
            "UPDATE stories SET
                title = COALESCE($3, title)
             WHERE id = $1 AND owner_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(input.title.as_deref().map(str::trim))
            .fetch_optional(pool)
            .await
    }

    /// Delete an owned story. Its scenes and their versions go with it
    /// (`ON DELETE CASCADE`). Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, owner_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM stories WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
