//! JSON endpoints under `/dashboard/api`.

use axum::Json;
use axum::extract::{Path as AxumPath, Query, State};
use cookwatch_types::{
    ApiError, ClosestResponse, ClosestSample, MotionPoint, TemperaturePoint,
};
use serde::Deserialize;
use tracing::debug;

use crate::app::{AppState, run_blocking};
use crate::series::{self, SeriesKind};

#[derive(Debug, Default, Deserialize)]
pub struct ClosestQuery {
    pub datetime: Option<String>,
}

pub async fn api_temperature(
    State(state): State<AppState>,
    AxumPath(session_number): AxumPath<i64>,
) -> Json<Vec<TemperaturePoint>> {
    let db = state.db.clone();
    let samples = run_blocking("temperature series", move || {
        series::temperature_series(&db, session_number)
    })
    .await
    .unwrap_or_default();
    Json(samples.iter().map(|sample| sample.to_point()).collect())
}

pub async fn api_motion(
    State(state): State<AppState>,
    AxumPath(session_number): AxumPath<i64>,
) -> Json<Vec<MotionPoint>> {
    let db = state.db.clone();
    let samples = run_blocking("motion series", move || {
        series::motion_series(&db, session_number)
    })
    .await
    .unwrap_or_default();
    Json(samples.iter().map(|sample| sample.to_point()).collect())
}

pub async fn api_temperature_closest(
    State(state): State<AppState>,
    AxumPath(session_number): AxumPath<i64>,
    Query(query): Query<ClosestQuery>,
) -> Json<ClosestResponse<f64>> {
    let db = state.db.clone();
    let samples = run_blocking("temperature series", move || {
        series::temperature_series(&db, session_number)
    })
    .await
    .unwrap_or_default();
    let target = query.datetime.unwrap_or_default();
    Json(respond(
        series::closest(SeriesKind::Temperature, &samples, &target),
        session_number,
    ))
}

pub async fn api_motion_closest(
    State(state): State<AppState>,
    AxumPath(session_number): AxumPath<i64>,
    Query(query): Query<ClosestQuery>,
) -> Json<ClosestResponse<bool>> {
    let db = state.db.clone();
    let samples = run_blocking("motion series", move || {
        series::motion_series(&db, session_number)
    })
    .await
    .unwrap_or_default();
    let target = query.datetime.unwrap_or_default();
    let result = series::closest(SeriesKind::Motion, &samples, &target)
        .map(|found| ClosestSample { index: None, ..found });
    Json(respond(result, session_number))
}

fn respond<V>(
    result: Result<ClosestSample<V>, series::ClosestError>,
    session_number: i64,
) -> ClosestResponse<V> {
    match result {
        Ok(found) => ClosestResponse::Found(found),
        Err(error) => {
            debug!(session_number, %error, "closest query answered with error payload");
            ClosestResponse::Error(ApiError::new(error.to_string()))
        }
    }
}
