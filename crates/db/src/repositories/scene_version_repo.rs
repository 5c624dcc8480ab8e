//! Repository for the `scene_versions` table.
//!
//! Versions are append-only. Every append runs in one transaction that:
//!
//! 1. locks the parent `scenes` row (`SELECT ... FOR UPDATE`),
//! 2. computes `MAX(version_number) + 1` for the scene,
//! 3. inserts the new snapshot,
//! 4. points `scenes.current_version_id` at it and copies its title/content.
//!
//! The row lock serializes concurrent appends to the same scene, so two
//! edits never compute the same version number and the scene pointer always
//! lands on the highest version.

use sqlx::{PgConnection, PgPool};
use storyforge_core::types::DbId;

use crate::models::scene::{Scene, UpdateScene};
use crate::models::scene_version::SceneVersion;
use crate::repositories::scene_repo::COLUMNS as SCENE_COLUMNS;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, scene_id, version_number, title, content, created_at";

/// Version history operations for scenes.
pub struct SceneVersionRepo;

impl SceneVersionRepo {
    // ── Appends ──────────────────────────────────────────────────────

    /// Record a new snapshot for a scene and make it current.
    ///
    /// Returns `None` if the scene does not exist.
    pub async fn create_version(
        pool: &PgPool,
        scene_id: DbId,
        title: &str,
        content: &str,
    ) -> Result<Option<SceneVersion>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if lock_scene(&mut tx, scene_id).await?.is_none() {
            return Ok(None);
        }
        let (_, version) = append(&mut tx, scene_id, title, content).await?;

        tx.commit().await?;
        Ok(Some(version))
    }

    /// Apply a partial edit: omitted fields keep the scene's current value.
    ///
    /// The merge happens under the scene lock, so two concurrent partial edits
    /// (one changing the title, one the content) do not overwrite each other.
    /// Returns the updated scene and the version that was appended, or `None`
    /// if the scene does not exist.
    pub async fn edit(
        pool: &PgPool,
        scene_id: DbId,
        input: &UpdateScene,
    ) -> Result<Option<(Scene, SceneVersion)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(current) = lock_scene(&mut tx, scene_id).await? else {
            return Ok(None);
        };
        let title = input.title.as_deref().unwrap_or(&current.title);
        let content = input
            .content
            .as_deref()
            .or(current.content.as_deref())
            .unwrap_or_default();
        let result = append(&mut tx, scene_id, title, content).await?;

        tx.commit().await?;
        Ok(Some(result))
    }

    /// Append a copy of an earlier snapshot as the newest version.
    ///
    /// History is never rewritten: restoring version 2 of a scene at version 5
    /// creates version 6 with version 2's title and content. Returns `None` if
    /// the scene or the requested version does not exist.
    pub async fn restore_version(
        pool: &PgPool,
        scene_id: DbId,
        version_number: i32,
    ) -> Result<Option<(Scene, SceneVersion)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if lock_scene(&mut tx, scene_id).await?.is_none() {
            return Ok(None);
        }
        let query = format!(
            "SELECT {COLUMNS} FROM scene_versions WHERE scene_id = $1 AND version_number = $2"
        );
        let Some(source) = sqlx::query_as::<_, SceneVersion>(&query)
            .bind(scene_id)
            .bind(version_number)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };
        let result = append(&mut tx, scene_id, &source.title, &source.content).await?;

        tx.commit().await?;
        tracing::info!(
            scene_id,
            restored_from = version_number,
            version_number = result.1.version_number,
            "Scene version restored"
        );
        Ok(Some(result))
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// The version referenced by `scenes.current_version_id`.
    ///
    /// Returns `None` when the scene has no recorded version yet (or does not
    /// exist; callers check the scene first when they need to tell these apart).
    pub async fn get_current(
        pool: &PgPool,
        scene_id: DbId,
    ) -> Result<Option<SceneVersion>, sqlx::Error> {
        sqlx::query_as::<_, SceneVersion>(
            "SELECT v.id, v.scene_id, v.version_number, v.title, v.content, v.created_at
             FROM scenes s
             JOIN scene_versions v ON v.id = s.current_version_id
             WHERE s.id = $1",
        )
        .bind(scene_id)
        .fetch_optional(pool)
        .await
    }

    /// All versions of a scene, oldest first.
    pub async fn list_versions(
        pool: &PgPool,
        scene_id: DbId,
    ) -> Result<Vec<SceneVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scene_versions
             WHERE scene_id = $1
             ORDER BY version_number ASC"
        );
        sqlx::query_as::<_, SceneVersion>(&query)
            .bind(scene_id)
            .fetch_all(pool)
            .await
    }

    /// A single snapshot by its per-scene version number.
    pub async fn find_by_number(
        pool: &PgPool,
        scene_id: DbId,
        version_number: i32,
    ) -> Result<Option<SceneVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scene_versions WHERE scene_id = $1 AND version_number = $2"
        );
        sqlx::query_as::<_, SceneVersion>(&query)
            .bind(scene_id)
            .bind(version_number)
            .fetch_optional(pool)
            .await
    }
}

// ── Transaction helpers ──────────────────────────────────────────────

/// Lock a scene row for the rest of the transaction.
pub(crate) async fn lock_scene(
    conn: &mut PgConnection,
    scene_id: DbId,
) -> Result<Option<Scene>, sqlx::Error> {
    let query = format!("SELECT {SCENE_COLUMNS} FROM scenes WHERE id = $1 FOR UPDATE");
    sqlx::query_as::<_, Scene>(&query)
        .bind(scene_id)
        .fetch_optional(conn)
        .await
}

/// Insert the next version for a scene and sync the scene row to it.
///
/// The title is stored trimmed, the same as story titles. The caller must
/// hold the scene's row lock.
pub(crate) async fn append(
    conn: &mut PgConnection,
    scene_id: DbId,
    title: &str,
    content: &str,
) -> Result<(Scene, SceneVersion), sqlx::Error> {
    let (next_number,): (i32,) = sqlx::query_as(
        "SELECT COALESCE(MAX(version_number), 0) + 1 \
         FROM scene_versions WHERE scene_id = $1",
    )
    .bind(scene_id)
    .fetch_one(&mut *conn)
    .await?;

    let insert = format!(
        "INSERT INTO scene_versions (scene_id, version_number, title, content)
         VALUES ($1, $2, $3, $4)
         RETURNING {COLUMNS}"
    );
    let version = sqlx::query_as::<_, SceneVersion>(&insert)
        .bind(scene_id)
        .bind(next_number)
        .bind(title.trim())
        .bind(content)
        .fetch_one(&mut *conn)
        .await?;

    let update = format!(
        "UPDATE scenes SET
            current_version_id = $2,
            title = $3,
            content = $4
         WHERE id = $1
         RETURNING {SCENE_COLUMNS}"
    );
    let scene = sqlx::query_as::<_, Scene>(&update)
        .bind(scene_id)
        .bind(version.id)
        .bind(&version.title)
        .bind(&version.content)
        .fetch_one(&mut *conn)
        .await?;

    tracing::info!(
        scene_id,
        version_id = version.id,
        version_number = version.version_number,
        "Scene version appended"
    );
    Ok((scene, version))
}
