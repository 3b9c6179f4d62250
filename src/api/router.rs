//! API router. Routes are nested under `/api/`.
//!
//! NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::endpoints;
use super::AppState;
use crate::config::MAX_UPLOAD_BYTES;

pub fn api_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/simplify", post(endpoints::simplify::simplify))
        .route(
            "/documents",
            get(endpoints::documents::list).delete(endpoints::documents::delete_all),
        )
        .route(
            "/documents/:id",
            get(endpoints::documents::detail).delete(endpoints::documents::remove),
        )
        .route(
            "/suggestions",
            post(endpoints::suggestions::create).get(endpoints::suggestions::list),
        )
        .route("/download/pdf", post(endpoints::download::pdf))
        .route("/download/image", post(endpoints::download::image))
        .with_state(state);

    Router::new()
        .nest("/api", api)
        // Base64 inflates the 8 MB upload cap by 4/3; allow 2x so the
        // handler's own size check (400) runs instead of the framework's 413.
        .layer(DefaultBodyLimit::max(2 * MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
