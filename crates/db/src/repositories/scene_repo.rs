//! Repository for the `scenes` table.

use sqlx::PgPool;
use storyforge_core::types::DbId;

use crate::models::scene::{CreateScene, Scene};
use crate::models::scene_version::SceneVersion;
use crate::repositories::scene_version_repo::append;

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str =
    "id, story_id, title, content, current_version_id, created_at, updated_at";

/// Same columns qualified with the `s` alias for joins.
const QUALIFIED_COLUMNS: &str = "s.id, s.story_id, s.title, s.content, \
    s.current_version_id, s.created_at, s.updated_at";

/// Provides CRUD operations for scenes. Content edits go through
/// [`SceneVersionRepo`](crate::repositories::SceneVersionRepo).
pub struct SceneRepo;

impl SceneRepo {
    /// Insert a scene together with its first version, in one transaction.
    ///
    /// The scene row starts with no content and no current version; appending
    /// version 1 fills both in.
    pub async fn create_with_initial_version(
        pool: &PgPool,
        story_id: DbId,
        input: &CreateScene,
    ) -> Result<(Scene, SceneVersion), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert = format!(
            "INSERT INTO scenes (story_id, title)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let scene = sqlx::query_as::<_, Scene>(&insert)
            .bind(story_id)
            .bind(input.title.trim())
            .fetch_one(&mut *tx)
            .await?;

        // The new row is only visible to this transaction, so no lock is needed.
        let result = append(&mut tx, scene.id, &input.title, &input.content).await?;

        tx.commit().await?;
        Ok(result)
    }

    /// Find a scene by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Scene>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scenes WHERE id = $1");
        sqlx::query_as::<_, Scene>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a scene whose story belongs to `owner_id`.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Scene>, sqlx::Error> {
        let query = format!(
            "SELECT {QUALIFIED_COLUMNS}
             FROM scenes s
             JOIN stories st ON st.id = s.story_id
             WHERE s.id = $1 AND st.owner_id = $2"
        );
        sqlx::query_as::<_, Scene>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// List the scenes of a story in creation order.
    pub async fn list_by_story(pool: &PgPool, story_id: DbId) -> Result<Vec<Scene>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scenes WHERE story_id = $1 ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Scene>(&query)
            .bind(story_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a scene and, by cascade, its versions. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM scenes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
