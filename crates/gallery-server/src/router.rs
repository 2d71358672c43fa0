use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with all gallery endpoints.
pub fn build_router(state: AppState) -> Router {
    let mut router: Router<AppState> = Router::new()
        .route("/", get(handler::index_handler))
        .route("/upload", post(handler::upload_handler))
        .route("/works", get(handler::works_handler))
        .route("/uploads/*filename", get(handler::file_handler))
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/info", get(handler::info_handler))
        .nest_service("/static", ServeDir::new(&state.static_dir))
        .layer(DefaultBodyLimit::max(state.max_upload_size))
        .layer(TraceLayer::new_for_http());
    if state.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    router.with_state(state)
}
