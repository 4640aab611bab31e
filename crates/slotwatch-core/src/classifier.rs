//! Page classifier.
//!
//! Turns an [`Observation`] into an [`Outcome`]. The page exposes no stable
//! structured signal, so the rules are heuristics over the document status,
//! the `<body id>` marker and the heading text. Rules are checked in order
//! and the first match wins:
//!
//! 1. fetch failed → `TransportError`
//! 2. 429, the "no slots" marker, or a maintenance heading → `KnownNonSuccess`
//! 3. 2xx with the "slots calendar" marker → `Success`
//! 4. anything else → `UnknownNonSuccess`
//!
//! Known-failure signals dominate: a rate-limited response carrying the
//! calendar marker is still a non-success.

use crate::types::{Observation, Outcome};

/// Marker of the page variant shown when every slot is taken.
pub const NO_SLOTS_MARKER: &str = "taken";

/// Marker of the page variant that renders the bookable calendar.
pub const SLOTS_CALENDAR_MARKER: &str = "dayselect";

/// Substring of the heading shown while the booking system is down for maintenance.
pub const MAINTENANCE_NOTICE: &str = "Wartung";

/// Status returned when the site rate-limits us.
pub const TOO_MANY_REQUESTS: u16 = 429;

/// Tunable classification rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRules {
    pub no_slots_marker: String,
    pub slots_calendar_marker: String,
    pub maintenance_notice: String,
}

impl Default for PageRules {
    fn default() -> Self {
        Self {
            no_slots_marker: NO_SLOTS_MARKER.to_string(),
            slots_calendar_marker: SLOTS_CALENDAR_MARKER.to_string(),
            maintenance_notice: MAINTENANCE_NOTICE.to_string(),
        }
    }
}

impl PageRules {
    /// Classify a captured observation.
    pub fn classify(&self, obs: &Observation) -> Outcome {
        if self.is_known_non_success(obs) {
            Outcome::KnownNonSuccess
        } else if obs.is_success_status() && obs.page_marker == self.slots_calendar_marker {
            Outcome::Success
        } else {
            Outcome::UnknownNonSuccess
        }
    }

    /// Classify the result of a fetch. Any fetch error is a `TransportError`.
    pub fn classify_fetch<E>(&self, fetched: &Result<Observation, E>) -> Outcome {
        match fetched {
            Ok(obs) => self.classify(obs),
            Err(_) => Outcome::TransportError,
        }
    }

    fn is_known_non_success(&self, obs: &Observation) -> bool {
        obs.http_status == TOO_MANY_REQUESTS
            || obs.page_marker == self.no_slots_marker
            || (!self.maintenance_notice.is_empty()
                && obs.heading_text.contains(&self.maintenance_notice))
    }
}

/// Classify with the default rules.
pub fn classify(obs: &Observation) -> Outcome {
    PageRules::default().classify(obs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(status: u16, marker: &str, heading: &str) -> Observation {
        Observation {
            http_status: status,
            page_marker: marker.to_string(),
            heading_text: heading.to_string(),
            current_location: "https://service.berlin.de/terminvereinbarung/termin/tag.php".to_string(),
        }
    }

    #[test]
    fn calendar_page_is_success() {
        assert_eq!(classify(&obs(200, "dayselect", "")), Outcome::Success);
    }

    #[test]
    fn rate_limit_dominates_calendar_marker() {
        assert_eq!(classify(&obs(429, "dayselect", "")), Outcome::KnownNonSuccess);
    }

    #[test]
    fn taken_marker_is_known_non_success() {
        assert_eq!(classify(&obs(200, "taken", "")), Outcome::KnownNonSuccess);
    }

    #[test]
    fn maintenance_heading_dominates_calendar_marker() {
        let o = obs(200, "dayselect", "Wegen Wartungsarbeiten nicht erreichbar");
        assert_eq!(classify(&o), Outcome::KnownNonSuccess);
    }

    #[test]
    fn not_found_page_is_unknown() {
        assert_eq!(
            classify(&obs(200, "", "Seite nicht gefunden")),
            Outcome::UnknownNonSuccess
        );
    }

    #[test]
    fn calendar_marker_with_server_error_is_unknown() {
        assert_eq!(classify(&obs(503, "dayselect", "")), Outcome::UnknownNonSuccess);
    }

    #[test]
    fn missing_status_is_unknown() {
        assert_eq!(classify(&obs(0, "dayselect", "")), Outcome::UnknownNonSuccess);
    }

    #[test]
    fn fetch_error_is_transport_error() {
        let rules = PageRules::default();
        let fetched: Result<Observation, &str> = Err("connection reset");
        assert_eq!(rules.classify_fetch(&fetched), Outcome::TransportError);

        let fetched: Result<Observation, &str> = Ok(obs(200, "dayselect", ""));
        assert_eq!(rules.classify_fetch(&fetched), Outcome::Success);
    }

    #[test]
    fn identical_observations_classify_identically() {
        let a = obs(200, "dayselect", "Termin buchen");
        let b = a.clone();
        assert_eq!(classify(&a), classify(&b));
    }

    #[test]
    fn custom_rules() {
        let rules = PageRules {
            no_slots_marker: "full".to_string(),
            slots_calendar_marker: "calendar".to_string(),
            maintenance_notice: String::new(),
        };
        assert_eq!(rules.classify(&obs(200, "calendar", "Wartung")), Outcome::Success);
        assert_eq!(rules.classify(&obs(200, "full", "")), Outcome::KnownNonSuccess);
        assert_eq!(rules.classify(&obs(200, "dayselect", "")), Outcome::UnknownNonSuccess);
    }
}
