//! Battery-to-range estimation.
//!
//! Asks the oracle for a structured three-field estimate and validates the
//! reply; any failure along the way resolves to the deterministic local
//! formula. The result is total: `estimate` never fails and never returns a
//! partially populated value.

use serde::Deserialize;
use tracing::warn;

use crate::domain::{BatteryLevel, Estimate};
use crate::oracle::Oracle;

/// Structured payload required of the oracle's estimate reply.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EstimatePayload {
    range_km: f64,
    time_left_hours: f64,
    efficiency_note: String,
}

#[derive(Debug, thiserror::Error)]
enum PayloadError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("rejected payload: {0}")]
    Invalid(&'static str),
}

/// Parse and validate an oracle estimate reply.
///
/// All three fields must be present (enforced by the deserializer), the
/// numbers finite and non-negative, and the note non-empty.
fn parse_payload(text: &str) -> Result<Estimate, PayloadError> {
    let payload: EstimatePayload = serde_json::from_str(text)?;

    if !payload.range_km.is_finite() || payload.range_km < 0.0 {
        return Err(PayloadError::Invalid("rangeKm out of range"));
    }
    if !payload.time_left_hours.is_finite() || payload.time_left_hours < 0.0 {
        return Err(PayloadError::Invalid("timeLeftHours out of range"));
    }
    if payload.efficiency_note.trim().is_empty() {
        return Err(PayloadError::Invalid("efficiencyNote is empty"));
    }

    Ok(Estimate {
        range_km: payload.range_km,
        time_left_hours: payload.time_left_hours,
        efficiency_note: payload.efficiency_note,
    })
}

/// Build the estimate prompt for a battery level and time label.
fn build_prompt(battery: BatteryLevel, time_label: &str) -> String {
    format!(
        "I have an Electric Vehicle (Generic Sedan).\n\
         Current Battery: {}%.\n\
         Current Time: {}.\n\
         \n\
         Please estimate:\n\
         1. Remaining Range in KM (assume avg efficiency).\n\
         2. Remaining Time in Hours (assuming highway driving at 90km/h).\n\
         3. A short, 1-sentence note about efficiency based on time of day or typical conditions.",
        battery.percent(),
        time_label
    )
}

/// The estimation engine.
///
/// Holds the oracle it delegates to; generic so tests can inject a stub.
#[derive(Debug, Clone)]
pub struct Estimator<O> {
    oracle: O,
}

impl<O: Oracle> Estimator<O> {
    pub fn new(oracle: O) -> Self {
        Self { oracle }
    }

    /// Estimate range and time remaining for the given battery level.
    ///
    /// One oracle attempt, no retry. Call failures and malformed or invalid
    /// payloads are logged and replaced by [`Estimate::fallback`].
    pub async fn estimate(&self, battery: BatteryLevel, time_label: &str) -> Estimate {
        let prompt = build_prompt(battery, time_label);

        match self.oracle.generate_estimate(&prompt).await {
            Ok(text) => match parse_payload(&text) {
                Ok(estimate) => estimate,
                Err(e) => {
                    warn!(error = %e, "estimate reply unusable, falling back");
                    Estimate::fallback(battery)
                }
            },
            Err(e) => {
                warn!(error = %e, "estimate request failed, falling back");
                Estimate::fallback(battery)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FALLBACK_NOTE;
    use crate::oracle::MockOracle;

    #[test]
    fn parse_valid_payload() {
        let est = parse_payload(
            r#"{"rangeKm": 262.5, "timeLeftHours": 2.9, "efficiencyNote": "Cool evening air."}"#,
        )
        .unwrap();
        assert_eq!(est.range_km, 262.5);
        assert_eq!(est.time_left_hours, 2.9);
        assert_eq!(est.efficiency_note, "Cool evening air.");
    }

    #[test]
    fn parse_rejects_missing_field() {
        assert!(parse_payload(r#"{"rangeKm": 262.5, "timeLeftHours": 2.9}"#).is_err());
    }

    #[test]
    fn parse_rejects_wrong_types() {
        assert!(
            parse_payload(r#"{"rangeKm": "far", "timeLeftHours": 2.9, "efficiencyNote": "x"}"#)
                .is_err()
        );
    }

    #[test]
    fn parse_rejects_negative_numbers() {
        assert!(
            parse_payload(r#"{"rangeKm": -1.0, "timeLeftHours": 2.9, "efficiencyNote": "x"}"#)
                .is_err()
        );
        assert!(
            parse_payload(r#"{"rangeKm": 10.0, "timeLeftHours": -0.5, "efficiencyNote": "x"}"#)
                .is_err()
        );
    }

    #[test]
    fn parse_rejects_blank_note() {
        assert!(
            parse_payload(r#"{"rangeKm": 10.0, "timeLeftHours": 0.5, "efficiencyNote": "  "}"#)
                .is_err()
        );
    }

    #[test]
    fn parse_rejects_non_json() {
        assert!(parse_payload("range is about 250 km").is_err());
    }

    #[test]
    fn prompt_mentions_inputs() {
        let prompt = build_prompt(BatteryLevel::new(42), "2026-08-07 09:15");
        assert!(prompt.contains("42%"));
        assert!(prompt.contains("2026-08-07 09:15"));
    }

    #[tokio::test]
    async fn oracle_payload_used_when_valid() {
        let oracle = MockOracle::new().with_estimate_reply(
            r#"{"rangeKm": 300.0, "timeLeftHours": 3.3, "efficiencyNote": "Clear roads."}"#,
        );
        let estimator = Estimator::new(oracle);

        let est = estimator.estimate(BatteryLevel::new(80), "10:00").await;
        assert_eq!(est.range_km, 300.0);
        assert_eq!(est.efficiency_note, "Clear roads.");
    }

    #[tokio::test]
    async fn call_failure_falls_back() {
        let estimator = Estimator::new(MockOracle::failing());

        let est = estimator.estimate(BatteryLevel::new(80), "10:00").await;
        assert_eq!(est.range_km, 280.0);
        assert_eq!(est.time_left_hours, 280.0 / 90.0);
        assert_eq!(est.efficiency_note, FALLBACK_NOTE);
    }

    #[tokio::test]
    async fn malformed_reply_falls_back() {
        let oracle = MockOracle::new().with_estimate_reply("not json at all");
        let estimator = Estimator::new(oracle);

        let est = estimator.estimate(BatteryLevel::new(50), "10:00").await;
        assert_eq!(est.range_km, 175.0);
        assert_eq!(est.efficiency_note, FALLBACK_NOTE);
    }

    #[tokio::test]
    async fn schema_violation_falls_back() {
        let oracle = MockOracle::new()
            .with_estimate_reply(r#"{"rangeKm": 100.0, "efficiencyNote": "missing hours"}"#);
        let estimator = Estimator::new(oracle);

        let est = estimator.estimate(BatteryLevel::new(10), "10:00").await;
        assert_eq!(est.range_km, 35.0);
    }

    #[tokio::test]
    async fn empty_battery_fallback_is_zero() {
        let estimator = Estimator::new(MockOracle::failing());

        let est = estimator.estimate(BatteryLevel::new(0), "23:59").await;
        assert_eq!(est.range_km, 0.0);
        assert_eq!(est.time_left_hours, 0.0);
    }
}
