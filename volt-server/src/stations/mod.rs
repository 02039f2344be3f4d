//! Nearby charging-station search.
//!
//! The oracle is asked for the 3 nearest stations as strict pipe-delimited
//! lines, and separately supplies grounding metadata with authoritative
//! links. This module reconciles the two into one typed list:
//!
//! - `parse` extracts station candidates from the text body, skipping
//!   malformed lines rather than failing the batch;
//! - `merge` joins candidates to grounding records by case-insensitive
//!   name containment with positional fallback, synthesizing a maps-search
//!   link when no grounding link exists;
//! - `finder` fronts the whole pipeline as a total function.

mod finder;
mod merge;
mod parse;

pub use finder::{StationFinder, UNAVAILABLE_TEXT};
pub use merge::merge_stations;
pub use parse::parse_candidates;
