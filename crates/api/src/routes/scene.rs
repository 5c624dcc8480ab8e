//! Route definitions for the `/scenes` resource and its version history.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{scene, scene_version, screenplay};
use crate::state::AppState;

/// Routes mounted at `/scenes`.
///
/// ```text
/// GET    /{id}                                  -> get_by_id
/// PUT    /{id}                                  -> update
/// PATCH  /{id}                                  -> update
/// DELETE /{id}                                  -> delete
/// POST   /{id}/score                            -> screenplay::score_scene
///
/// GET    /{id}/versions                         -> scene_version::list
/// GET    /{id}/versions/current                 -> scene_version::current
/// GET    /{id}/versions/{number}                -> scene_version::get_by_number
/// POST   /{id}/versions/{number}/restore        -> scene_version::restore
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(scene::get_by_id)
                .put(scene::update)
                .patch(scene::update)
                .delete(scene::delete),
        )
        .route("/{id}/score", post(screenplay::score_scene))
        .route("/{id}/versions", get(scene_version::list))
        .route("/{id}/versions/current", get(scene_version::current))
        .route(
            "/{id}/versions/{number}",
            get(scene_version::get_by_number),
        )
        .route(
            "/{id}/versions/{number}/restore",
            post(scene_version::restore),
        )
}
