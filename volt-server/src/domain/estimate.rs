//! Range and time estimates.

use serde::Serialize;

use super::BatteryLevel;

/// Assumed driving range per percent of charge when the model is unavailable.
pub const FALLBACK_KM_PER_PERCENT: f64 = 3.5;

/// Assumed highway speed in km/h for the fallback time computation.
pub const FALLBACK_SPEED_KMH: f64 = 90.0;

/// Efficiency note attached to every fallback estimate.
pub const FALLBACK_NOTE: &str = "AI unavailable, showing rough estimates.";

/// A driving estimate derived from the current battery level.
///
/// Either all three fields come from a validated model response, or all
/// three come from the deterministic fallback formula. There is no partially
/// populated state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    /// Remaining driving range in kilometres.
    pub range_km: f64,

    /// Remaining driving time in hours.
    pub time_left_hours: f64,

    /// One-sentence note about efficiency conditions.
    pub efficiency_note: String,
}

impl Estimate {
    /// Deterministic estimate used whenever the model is unreachable or
    /// returns an unusable payload.
    pub fn fallback(battery: BatteryLevel) -> Self {
        let range_km = f64::from(battery.percent()) * FALLBACK_KM_PER_PERCENT;
        Self {
            range_km,
            time_left_hours: range_km / FALLBACK_SPEED_KMH,
            efficiency_note: FALLBACK_NOTE.to_string(),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The fallback formula holds exactly for every battery level.
        #[test]
        fn fallback_holds_for_all_levels(pct in 0u8..=100) {
            let est = Estimate::fallback(BatteryLevel::new(pct));
            prop_assert_eq!(est.range_km, f64::from(pct) * FALLBACK_KM_PER_PERCENT);
            prop_assert_eq!(est.time_left_hours, est.range_km / FALLBACK_SPEED_KMH);
            prop_assert_eq!(est.efficiency_note.as_str(), FALLBACK_NOTE);
        }

        /// Fallback estimates are always finite and non-negative.
        #[test]
        fn fallback_always_valid(pct in 0u8..=100) {
            let est = Estimate::fallback(BatteryLevel::new(pct));
            prop_assert!(est.range_km.is_finite() && est.range_km >= 0.0);
            prop_assert!(est.time_left_hours.is_finite() && est.time_left_hours >= 0.0);
            prop_assert!(!est.efficiency_note.is_empty());
        }
    }
}
