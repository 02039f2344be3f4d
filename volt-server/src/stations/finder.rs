//! Station search front.

use tracing::warn;

use crate::domain::StationSearch;
use crate::oracle::Oracle;

use super::merge::merge_stations;
use super::parse::parse_candidates;

/// Text returned when the oracle call fails outright.
pub const UNAVAILABLE_TEXT: &str =
    "Could not fetch station data at this time. Please check your internet or location permissions.";

/// Text substituted when the oracle replies with an empty body.
const EMPTY_REPLY_TEXT: &str = "No station information available.";

/// Build the station search prompt for a coordinate.
fn build_prompt(latitude: f64, longitude: f64) -> String {
    format!(
        "Find the 3 nearest EV charging stations to my location ({latitude}, {longitude}).\n\
         \n\
         For each station, strictly output a single line with this format:\n\
         Name|Address|Rating|Status\n\
         \n\
         - Name: Name of the station\n\
         - Address: Full address\n\
         - Rating: Number (e.g., 4.5), or \"N/A\" if not available\n\
         - Status: \"Open\" if currently open, \"Closed\" if closed, or \"Unknown\"\n\
         \n\
         Do not add introductory text or markdown styling like bolding. Just the list of pipe-separated values."
    )
}

/// The station reconciliation pipeline.
///
/// Generic over the oracle so the parse/merge logic can be exercised with a
/// stub.
#[derive(Debug, Clone)]
pub struct StationFinder<O> {
    oracle: O,
}

impl<O: Oracle> StationFinder<O> {
    pub fn new(oracle: O) -> Self {
        Self { oracle }
    }

    /// Find nearby stations for a coordinate.
    ///
    /// Total function: an oracle failure yields the fixed unavailable text
    /// and an empty list; a reply that ignores the line format yields
    /// stations built from grounding metadata alone.
    pub async fn find(&self, latitude: f64, longitude: f64) -> StationSearch {
        let prompt = build_prompt(latitude, longitude);

        let reply = match self.oracle.generate_grounded(&prompt, latitude, longitude).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "station request failed");
                return StationSearch {
                    text: UNAVAILABLE_TEXT.to_string(),
                    stations: Vec::new(),
                };
            }
        };

        let text = if reply.text.is_empty() {
            EMPTY_REPLY_TEXT.to_string()
        } else {
            reply.text
        };

        let candidates = parse_candidates(&text);
        let stations = merge_stations(&candidates, &reply.grounding);

        StationSearch { text, stations }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GroundingRecord, OpenStatus};
    use crate::oracle::MockOracle;

    fn record(title: Option<&str>, uri: Option<&str>) -> GroundingRecord {
        GroundingRecord {
            title: title.map(str::to_string),
            uri: uri.map(str::to_string),
        }
    }

    #[test]
    fn prompt_carries_coordinate() {
        let prompt = build_prompt(51.5074, -0.1278);
        assert!(prompt.contains("(51.5074, -0.1278)"));
        assert!(prompt.contains("Name|Address|Rating|Status"));
    }

    #[tokio::test]
    async fn happy_path_merges_text_and_grounding() {
        let oracle = MockOracle::new().with_grounded_reply(
            "Acme Charge|123 Main St|4.5|Open\nBeta Station|45 Oak Ave|N/A|Closed",
            vec![
                record(Some("acme charge"), Some("https://maps.example/acme")),
                record(Some("beta station"), Some("https://maps.example/beta")),
            ],
        );
        let finder = StationFinder::new(oracle);

        let result = finder.find(51.5, -0.12).await;
        assert_eq!(result.stations.len(), 2);

        let acme = &result.stations[0];
        assert_eq!(acme.name, "Acme Charge");
        assert_eq!(acme.rating, Some(4.5));
        assert_eq!(acme.status, Some(OpenStatus::Open));
        assert_eq!(acme.uri.as_deref(), Some("https://maps.example/acme"));

        let beta = &result.stations[1];
        assert_eq!(beta.rating, None);
        assert_eq!(beta.status, Some(OpenStatus::Closed));
        assert_eq!(beta.uri.as_deref(), Some("https://maps.example/beta"));
    }

    #[tokio::test]
    async fn failure_returns_fixed_text_and_empty_list() {
        let finder = StationFinder::new(MockOracle::failing());

        let result = finder.find(51.5, -0.12).await;
        assert_eq!(result.text, UNAVAILABLE_TEXT);
        assert!(result.stations.is_empty());
    }

    #[tokio::test]
    async fn unformatted_reply_uses_grounding_alone() {
        let oracle = MockOracle::new().with_grounded_reply(
            "I'm sorry, here are some nearby chargers in prose form.",
            vec![
                record(Some("Acme Charge"), Some("https://maps.example/acme")),
                record(None, Some("https://maps.example/untitled")),
            ],
        );
        let finder = StationFinder::new(oracle);

        let result = finder.find(51.5, -0.12).await;
        assert_eq!(result.stations.len(), 2);
        assert_eq!(result.stations[0].name, "Acme Charge");
        assert_eq!(result.stations[0].address, "View on Map for details");
        assert_eq!(result.stations[1].name, "EV Station");
    }

    #[tokio::test]
    async fn empty_reply_text_is_substituted() {
        let oracle = MockOracle::new().with_grounded_reply(
            "",
            vec![record(Some("Acme Charge"), Some("https://maps.example/acme"))],
        );
        let finder = StationFinder::new(oracle);

        let result = finder.find(51.5, -0.12).await;
        assert_eq!(result.text, "No station information available.");
        assert_eq!(result.stations.len(), 1);
    }

    #[tokio::test]
    async fn no_text_and_no_grounding_yields_empty_list() {
        let finder = StationFinder::new(MockOracle::new());

        let result = finder.find(51.5, -0.12).await;
        assert_eq!(result.text, "No station information available.");
        assert!(result.stations.is_empty());
    }
}
