pub mod auth;
pub mod health;
pub mod scene;
pub mod screenplay;
pub mod story;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (requires auth)
/// /auth/me                                         current user (requires auth)
///
/// /stories                                         list, create
/// /stories/{id}                                    get, update, delete
/// /stories/{id}/scenes                             list, create
///
/// /scenes/{id}                                     get, update (PUT/PATCH), delete
/// /scenes/{id}/score                               score current version (POST)
/// /scenes/{id}/versions                            history
/// /scenes/{id}/versions/current                    current version
/// /scenes/{id}/versions/{number}                   one version
/// /scenes/{id}/versions/{number}/restore           restore (POST)
///
/// /screenplay/convert                              prose -> tagged screenplay (POST)
/// /screenplay/score                                rubric scores (POST)
/// /screenplay/summarize                            summary (POST)
/// ```
///
/// Everything except register, login and refresh requires a Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/stories", story::router())
        .nest("/scenes", scene::router())
        .nest("/screenplay", screenplay::router())
}
