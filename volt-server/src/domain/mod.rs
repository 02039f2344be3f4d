//! Core domain types for the EV companion.

mod battery;
mod estimate;
mod reading;
mod station;

pub use battery::BatteryLevel;
pub use estimate::{Estimate, FALLBACK_KM_PER_PERCENT, FALLBACK_NOTE, FALLBACK_SPEED_KMH};
pub use reading::Reading;
pub use station::{GroundingRecord, OpenStatus, Station, StationCandidate, StationSearch};
