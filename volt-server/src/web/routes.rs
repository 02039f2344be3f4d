//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Local;
use tower_http::services::ServeDir;

use crate::domain::{BatteryLevel, Estimate, Reading};
use crate::history::HistoryError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
///
/// `static_dir` is the path to the dashboard assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/estimate", post(estimate))
        .route("/api/stations", get(find_stations))
        .route(
            "/api/history",
            get(list_history).post(save_reading).delete(clear_history),
        )
        .route("/api/drive/start", post(start_drive))
        .route("/api/drive/stop", post(stop_drive))
        .route("/api/drive/latest", get(drive_latest))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Produce a fresh estimate for a battery level.
///
/// Always 200: oracle trouble resolves to the deterministic fallback
/// inside the pipeline, never to an error status.
async fn estimate(
    State(state): State<AppState>,
    Json(req): Json<EstimateRequest>,
) -> Json<Estimate> {
    let battery = BatteryLevel::from_signed(req.battery_percentage);
    let time_label = req
        .time_label
        .unwrap_or_else(|| Local::now().format("%Y-%m-%d %H:%M").to_string());

    Json(state.estimator.estimate(battery, &time_label).await)
}

/// Search for charging stations near a coordinate.
///
/// Missing or non-numeric coordinates reject with 400 before the handler
/// runs; an oracle failure still answers 200 with the explanatory text.
async fn find_stations(
    State(state): State<AppState>,
    Query(query): Query<StationsQuery>,
) -> Json<StationsResponse> {
    let search = state.finder.find(query.lat, query.lng).await;
    Json(StationsResponse::from_search(&search))
}

/// All saved readings, newest first.
async fn list_history(State(state): State<AppState>) -> Json<HistoryResponse> {
    Json(HistoryResponse {
        readings: state.log.all().await,
    })
}

/// Save a reading of the estimate currently shown to the user.
async fn save_reading(
    State(state): State<AppState>,
    Json(req): Json<SaveReadingRequest>,
) -> Result<Json<Reading>, AppError> {
    let battery = BatteryLevel::from_signed(req.battery_percentage);
    let reading = Reading::new(
        battery,
        req.range_km,
        req.time_left_hours,
        req.notes,
        req.latitude,
        req.longitude,
    );

    let stored = state.log.append(reading).await?;
    Ok(Json(stored))
}

/// Delete every saved reading.
async fn clear_history(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.log.clear().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Start (or restart) the simulated drive.
async fn start_drive(
    State(state): State<AppState>,
    Json(req): Json<DriveStartRequest>,
) -> Json<DriveStatusResponse> {
    let battery = BatteryLevel::from_signed(req.battery_percentage);
    state.drive.start(battery).await;

    Json(DriveStatusResponse {
        running: true,
        latest: state.drive.latest().as_ref().map(DriveTickResult::from_tick),
    })
}

/// Stop the simulated drive.
async fn stop_drive(State(state): State<AppState>) -> Json<DriveStatusResponse> {
    state.drive.stop().await;

    Json(DriveStatusResponse {
        running: false,
        latest: state.drive.latest().as_ref().map(DriveTickResult::from_tick),
    })
}

/// The most recent simulation tick.
async fn drive_latest(State(state): State<AppState>) -> Json<DriveStatusResponse> {
    Json(DriveStatusResponse {
        running: state.drive.is_running().await,
        latest: state.drive.latest().as_ref().map(DriveTickResult::from_tick),
    })
}

/// Web layer errors.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<HistoryError> for AppError {
    fn from(e: HistoryError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
