//! Persisted reading snapshots.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::BatteryLevel;

/// A saved snapshot of an estimate at a battery level and time.
///
/// Readings are append-only and stored newest-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    /// Unique identifier (the creation timestamp rendered as a string).
    pub id: String,

    /// Creation time in milliseconds since the Unix epoch.
    pub timestamp: i64,

    pub battery_percentage: u8,

    pub estimated_range_km: f64,

    pub estimated_time_hours: f64,

    /// The efficiency note from the estimate, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl Reading {
    /// Create a reading stamped with the current wall-clock time.
    pub fn new(
        battery: BatteryLevel,
        estimated_range_km: f64,
        estimated_time_hours: f64,
        notes: Option<String>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Self {
        let millis = Utc::now().timestamp_millis();
        Self {
            id: millis.to_string(),
            timestamp: millis,
            battery_percentage: battery.percent(),
            estimated_range_km,
            estimated_time_hours,
            notes,
            latitude,
            longitude,
        }
    }
}
