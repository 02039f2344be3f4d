//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Estimate, Reading, Station, StationSearch};
use crate::drive::DriveTick;

/// Request for a fresh estimate.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    /// Battery percentage; clamped to 0..=100 server-side
    pub battery_percentage: i64,

    /// Time label to estimate for (defaults to now)
    pub time_label: Option<String>,
}

/// Query parameters for the station search.
#[derive(Debug, Deserialize)]
pub struct StationsQuery {
    pub lat: f64,
    pub lng: f64,
}

/// A station in search results.
///
/// The three-valued opening status collapses to the two-valued `openNow`
/// here: only a station known to be open reports true.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationResult {
    pub name: String,

    pub address: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_now: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

impl StationResult {
    pub fn from_station(station: &Station) -> Self {
        Self {
            name: station.name.clone(),
            address: station.address.clone(),
            rating: station.rating,
            open_now: station.status.map(|s| s.as_open_now()),
            uri: station.uri.clone(),
        }
    }
}

/// Response for the station search.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    /// The raw model reply (or a fixed explanatory message)
    pub text: String,

    /// Reconciled stations, in reply order
    pub stations: Vec<StationResult>,
}

impl StationsResponse {
    pub fn from_search(search: &StationSearch) -> Self {
        Self {
            text: search.text.clone(),
            stations: search
                .stations
                .iter()
                .map(StationResult::from_station)
                .collect(),
        }
    }
}

/// Request to save a reading.
///
/// Carries the estimate currently shown to the user; the server stamps the
/// id and timestamp.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveReadingRequest {
    pub battery_percentage: i64,

    pub range_km: f64,

    pub time_left_hours: f64,

    pub notes: Option<String>,

    pub latitude: Option<f64>,

    pub longitude: Option<f64>,
}

/// Response for history reads.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    /// Saved readings, newest first
    pub readings: Vec<Reading>,
}

/// Request to start a simulated drive.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveStartRequest {
    pub battery_percentage: i64,
}

/// One published simulation tick.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveTickResult {
    pub battery_percentage: u8,
    pub estimate: Estimate,
}

impl DriveTickResult {
    pub fn from_tick(tick: &DriveTick) -> Self {
        Self {
            battery_percentage: tick.battery.percent(),
            estimate: tick.estimate.clone(),
        }
    }
}

/// Current state of the simulated drive.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveStatusResponse {
    pub running: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest: Option<DriveTickResult>,
}
