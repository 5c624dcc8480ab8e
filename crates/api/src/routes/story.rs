//! Route definitions for the `/stories` resource, including the scenes
//! nested under a story.

use axum::routing::get;
use axum::Router;

use crate::handlers::{scene, story};
use crate::state::AppState;

/// Routes mounted at `/stories`.
///
/// ```text
/// GET    /                       -> list
/// POST   /                       -> create
/// GET    /{id}                   -> get_by_id
/// PUT    /{id}                   -> update
/// DELETE /{id}                   -> delete
///
/// GET    /{id}/scenes            -> scene::list_by_story
/// POST   /{id}/scenes            -> scene::create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(story::list).post(story::create))
        .route(
            "/{id}",
            get(story::get_by_id)
                .put(story::update)
                .delete(story::delete),
        )
        .route(
            "/{id}/scenes",
            get(scene::list_by_story).post(scene::create),
        )
}
