//! HTML pages: dashboard, session detail and the sessions table.

use axum::extract::{Path as AxumPath, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use tracing::info;

use crate::app::{AppState, run_blocking};
use crate::images::{self, SessionImages};
use crate::render::{self, DashboardView};
use crate::sessions::{self, CookingSession};
use crate::stats::DashboardStats;

pub const SESSION_NOT_FOUND_REDIRECT: &str = "/dashboard?error=session-not-found";

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub error: Option<String>,
}

pub async fn home() -> Redirect {
    Redirect::to("/dashboard")
}

pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Html<String> {
    let error = query.error.clone();
    let page = run_blocking("dashboard", move || {
        let (stats, images) = overview(&state);
        info!(
            sessions = stats.total_sessions,
            months = stats.months.len(),
            "dashboard rendered"
        );
        render::dashboard_page(&DashboardView {
            stats: &stats,
            images: &images,
            error: query.error.as_deref(),
        })
    })
    .await;

    Html(page.unwrap_or_else(|| {
        let stats = DashboardStats::compute(&[]);
        render::dashboard_page(&DashboardView {
            stats: &stats,
            images: &SessionImages::default(),
            error: error.as_deref(),
        })
    }))
}

pub async fn session_list(State(state): State<AppState>) -> Html<String> {
    let page = run_blocking("sessions", move || {
        let sessions = sessions::list_sessions(&state.db);
        let images = session_images(&state, &sessions);
        let stats = DashboardStats::compute(&sessions);
        render::sessions_page(&sessions, &stats, &images)
    })
    .await;

    Html(page.unwrap_or_else(|| {
        render::sessions_page(&[], &DashboardStats::compute(&[]), &SessionImages::default())
    }))
}

pub async fn session_details(
    State(state): State<AppState>,
    AxumPath(session_number): AxumPath<i64>,
) -> Response {
    let page = run_blocking("session details", move || {
        let mut session = sessions::session_by_number(&state.db, session_number)?;
        let urls = images::all_image_urls(state.images.as_ref(), session_number);
        session.image_url = images::thumbnail_of(&urls).map(str::to_owned);
        Some(render::session_page(&session, &urls))
    })
    .await
    .flatten();

    match page {
        Some(html) => Html(html).into_response(),
        None => {
            info!(session_number, "session not found, redirecting");
            Redirect::to(SESSION_NOT_FOUND_REDIRECT).into_response()
        }
    }
}

/// Sessions plus the per-request image maps the dashboard needs.
fn overview(state: &AppState) -> (DashboardStats, SessionImages) {
    let mut sessions = sessions::list_sessions(&state.db);
    let images = session_images(state, &sessions);
    for session in &mut sessions {
        session.image_url = images.thumbnail(session.session_number).map(str::to_owned);
    }
    (DashboardStats::compute(&sessions), images)
}

fn session_images(state: &AppState, sessions: &[CookingSession]) -> SessionImages {
    let numbers: Vec<i64> = sessions.iter().map(|s| s.session_number).collect();
    SessionImages::collect(state.images.as_ref(), &numbers)
}
