//! Reconciling parsed candidates with grounding metadata.

use crate::domain::{GroundingRecord, Station, StationCandidate};

/// Name used for grounding-only stations without a title.
const GROUNDING_ONLY_NAME: &str = "EV Station";

/// Address placeholder for grounding-only stations.
const GROUNDING_ONLY_ADDRESS: &str = "View on Map for details";

/// Merge parsed candidates with grounding records into the final list.
///
/// With at least one candidate, each candidate at position `i` is joined to
/// a grounding record chosen by name match first (the first record whose
/// title the candidate name contains, case-insensitively), then by position
/// (the record at index `i`). The record supplies the link; when neither
/// method finds a link, one is synthesized as a maps search query over the
/// candidate's name and address.
///
/// With no candidates at all (the model ignored the line format), stations
/// are built from the grounding records alone, placeholders standing in for
/// the unparsed fields.
///
/// Pure function of its inputs: result order follows candidate order (or
/// grounding order in the fallback branch), and repeated calls on the same
/// inputs yield the same list.
pub fn merge_stations(
    candidates: &[StationCandidate],
    grounding: &[GroundingRecord],
) -> Vec<Station> {
    if candidates.is_empty() {
        return grounding
            .iter()
            .map(|record| Station {
                name: record
                    .title
                    .clone()
                    .unwrap_or_else(|| GROUNDING_ONLY_NAME.to_string()),
                address: GROUNDING_ONLY_ADDRESS.to_string(),
                rating: None,
                status: None,
                uri: record.uri.clone(),
            })
            .collect();
    }

    candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| {
            let matched = match_by_name(candidate, grounding).or_else(|| grounding.get(index));

            let uri = matched
                .and_then(|record| record.uri.clone())
                .unwrap_or_else(|| maps_search_uri(&candidate.name, &candidate.address));

            Station {
                name: candidate.name.clone(),
                address: candidate.address.clone(),
                rating: candidate.rating,
                status: Some(candidate.status),
                uri: Some(uri),
            }
        })
        .collect()
}

/// First grounding record whose title the candidate name contains,
/// case-insensitively. Scan order is the grounding list's own order.
fn match_by_name<'a>(
    candidate: &StationCandidate,
    grounding: &'a [GroundingRecord],
) -> Option<&'a GroundingRecord> {
    let name_lower = candidate.name.to_lowercase();
    grounding.iter().find(|record| {
        record
            .title
            .as_ref()
            .is_some_and(|title| name_lower.contains(&title.to_lowercase()))
    })
}

/// Maps search link over a station's name and address.
fn maps_search_uri(name: &str, address: &str) -> String {
    let query = format!("{name} {address}");
    format!(
        "https://www.google.com/maps/search/?api=1&query={}",
        urlencoding::encode(&query)
    )
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::OpenStatus;
    use proptest::prelude::*;

    fn arb_candidate() -> impl Strategy<Value = StationCandidate> {
        ("[a-zA-Z ]{1,20}", "[a-zA-Z0-9 ]{1,20}").prop_map(|(name, address)| StationCandidate {
            name,
            address,
            rating: None,
            status: OpenStatus::Unknown,
        })
    }

    fn arb_record() -> impl Strategy<Value = GroundingRecord> {
        (
            proptest::option::of("[a-zA-Z ]{1,20}"),
            proptest::option::of("[a-z:/.]{1,30}"),
        )
            .prop_map(|(title, uri)| GroundingRecord { title, uri })
    }

    proptest! {
        /// With candidates present, output length and order follow the
        /// candidate list and every station has a link.
        #[test]
        fn candidate_branch_invariants(
            candidates in proptest::collection::vec(arb_candidate(), 1..6),
            grounding in proptest::collection::vec(arb_record(), 0..6),
        ) {
            let stations = merge_stations(&candidates, &grounding);
            prop_assert_eq!(stations.len(), candidates.len());
            for (station, candidate) in stations.iter().zip(&candidates) {
                prop_assert_eq!(&station.name, &candidate.name);
                prop_assert_eq!(&station.address, &candidate.address);
                prop_assert!(station.uri.as_deref().is_some_and(|u| !u.is_empty()));
            }
        }

        /// The grounding-only branch yields one station per record.
        #[test]
        fn grounding_branch_invariants(
            grounding in proptest::collection::vec(arb_record(), 0..6),
        ) {
            let stations = merge_stations(&[], &grounding);
            prop_assert_eq!(stations.len(), grounding.len());
            for station in &stations {
                prop_assert!(station.rating.is_none());
                prop_assert!(station.status.is_none());
            }
        }
    }
}
