//! Candidate extraction from the oracle's line-list reply.

use crate::domain::{OpenStatus, StationCandidate};

/// Name used when the model leaves the first field blank.
const UNKNOWN_NAME: &str = "Unknown Station";

/// Address used when the model leaves the second field blank.
const UNKNOWN_ADDRESS: &str = "Address unavailable";

/// Extract station candidates from a reply body.
///
/// Keeps only lines that contain a pipe and split into at least three
/// fields; everything else (prose, markup, truncated rows) is skipped
/// silently.
pub fn parse_candidates(text: &str) -> Vec<StationCandidate> {
    text.lines().filter_map(parse_line).collect()
}

/// Parse one `Name|Address|Rating|Status` line.
fn parse_line(line: &str) -> Option<StationCandidate> {
    if !line.contains('|') {
        return None;
    }

    let fields: Vec<&str> = line.split('|').map(str::trim).collect();
    if fields.len() < 3 {
        return None;
    }

    let name = if fields[0].is_empty() {
        UNKNOWN_NAME.to_string()
    } else {
        fields[0].to_string()
    };

    let address = if fields[1].is_empty() {
        UNKNOWN_ADDRESS.to_string()
    } else {
        fields[1].to_string()
    };

    // "N/A" and other non-numeric ratings become absent, not zero.
    let rating = fields[2].parse::<f64>().ok().filter(|r| r.is_finite());

    let status = OpenStatus::parse(fields.get(3).copied().unwrap_or(""));

    Some(StationCandidate {
        name,
        address,
        rating,
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_line() {
        let candidates = parse_candidates("Acme Charge|123 Main St|4.5|Open");
        assert_eq!(candidates.len(), 1);

        let c = &candidates[0];
        assert_eq!(c.name, "Acme Charge");
        assert_eq!(c.address, "123 Main St");
        assert_eq!(c.rating, Some(4.5));
        assert_eq!(c.status, OpenStatus::Open);
        assert!(c.status.as_open_now());
    }

    #[test]
    fn non_numeric_rating_is_absent() {
        let candidates = parse_candidates("Beta Station|45 Oak Ave|N/A|Closed");
        assert_eq!(candidates.len(), 1);

        let c = &candidates[0];
        assert_eq!(c.name, "Beta Station");
        assert_eq!(c.address, "45 Oak Ave");
        assert_eq!(c.rating, None);
        assert_eq!(c.status, OpenStatus::Closed);
        assert!(!c.status.as_open_now());
    }

    #[test]
    fn short_lines_are_skipped() {
        assert!(parse_candidates("Just Name|Address").is_empty());
        assert!(parse_candidates("No pipes here at all").is_empty());
        assert!(parse_candidates("").is_empty());
    }

    #[test]
    fn three_fields_is_enough() {
        let candidates = parse_candidates("Gamma|7 High St|3.9");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].rating, Some(3.9));
        // No status field at all
        assert_eq!(candidates[0].status, OpenStatus::Unknown);
    }

    #[test]
    fn blank_fields_get_placeholders() {
        let candidates = parse_candidates("|  |4.0|Open");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "Unknown Station");
        assert_eq!(candidates[0].address, "Address unavailable");
    }

    #[test]
    fn fields_are_trimmed() {
        let candidates = parse_candidates("  Acme Charge  |  123 Main St  | 4.5 | Open ");
        assert_eq!(candidates[0].name, "Acme Charge");
        assert_eq!(candidates[0].address, "123 Main St");
        assert_eq!(candidates[0].rating, Some(4.5));
        assert_eq!(candidates[0].status, OpenStatus::Open);
    }

    #[test]
    fn prose_between_rows_is_ignored() {
        let text = "Here are the stations:\n\
                    Acme Charge|123 Main St|4.5|Open\n\
                    \n\
                    Beta Station|45 Oak Ave|N/A|Closed\n\
                    Let me know if you need more!";
        let candidates = parse_candidates(text);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].name, "Acme Charge");
        assert_eq!(candidates[1].name, "Beta Station");
    }

    #[test]
    fn order_follows_input() {
        let text = "Z Station|1 A St|1.0|Open\nA Station|2 B St|5.0|Open";
        let candidates = parse_candidates(text);
        assert_eq!(candidates[0].name, "Z Station");
        assert_eq!(candidates[1].name, "A Station");
    }

    #[test]
    fn status_parsing_is_case_insensitive() {
        let candidates = parse_candidates("X|Y|1.0|OPEN 24/7");
        assert_eq!(candidates[0].status, OpenStatus::Open);

        let candidates = parse_candidates("X|Y|1.0|unknown");
        assert_eq!(candidates[0].status, OpenStatus::Unknown);
        assert!(!candidates[0].status.as_open_now());
    }
}
