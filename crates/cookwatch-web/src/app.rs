use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::services::ServeDir;
use tracing::error;

use crate::api::pages::{dashboard, home, session_details, session_list};
use crate::api::series::{
    api_motion, api_motion_closest, api_temperature, api_temperature_closest,
};
use crate::db::Db;
use crate::images::ImageSource;

/// Shared by every request. Nothing in here is mutable; per-request lookups
/// (image maps, statistics) are built inside the handler and dropped with it.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Db>,
    pub images: Arc<dyn ImageSource>,
}

impl AppState {
    pub fn new(db: Db, images: Arc<dyn ImageSource>) -> Self {
        Self {
            db: Arc::new(db),
            images,
        }
    }
}

pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/sessions", get(session_list))
        .route("/dashboard", get(dashboard))
        .route("/dashboard/session/{session_number}", get(session_details))
        .route(
            "/dashboard/api/temperature/{session_number}",
            get(api_temperature),
        )
        .route(
            "/dashboard/api/temperature/{session_number}/closest",
            get(api_temperature_closest),
        )
        .route("/dashboard/api/motion/{session_number}", get(api_motion))
        .route(
            "/dashboard/api/motion/{session_number}/closest",
            get(api_motion_closest),
        )
        .nest_service("/images", ServeDir::new(static_dir))
        .with_state(state)
}

pub async fn health() -> &'static str {
    "ok"
}

/// Runs storage/scrape work off the async workers. A panicked or cancelled
/// task is logged and reported as `None` so callers can fall back.
pub(crate) async fn run_blocking<T, F>(what: &'static str, work: F) -> Option<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(value) => Some(value),
        Err(join_error) => {
            error!(%join_error, what, "blocking task failed");
            None
        }
    }
}
