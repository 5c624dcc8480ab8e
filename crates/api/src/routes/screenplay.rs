use axum::routing::post;
use axum::Router;

use crate::handlers::screenplay;
use crate::state::AppState;

/// Routes mounted at `/screenplay`.
///
/// ```text
/// POST /convert    -> convert
/// POST /score      -> score
/// POST /summarize  -> summarize
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/convert", post(screenplay::convert))
        .route("/score", post(screenplay::score))
        .route("/summarize", post(screenplay::summarize))
}
