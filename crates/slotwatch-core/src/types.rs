//! Observation and outcome types shared by the browser, classifier and loop.

use std::fmt;

/// Raw result of one fetch of the target page.
///
/// Produced fresh on every tick and dropped once it has been classified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Observation {
    /// Status of the primary document response, `0` if it was never seen.
    pub http_status: u16,
    /// Page variant identifier (the `<body id>` of the page). Empty if absent.
    pub page_marker: String,
    /// Trimmed heading text. Empty if the page had none.
    pub heading_text: String,
    /// URL actually reached after redirects.
    pub current_location: String,
}

impl Observation {
    /// Whether the document status is in `[200, 300)`.
    pub fn is_success_status(&self) -> bool {
        (200..300).contains(&self.http_status)
    }
}

/// Classified result of one check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The slots calendar was served: appointments may be available.
    Success,
    /// A page we recognise as "nothing available" (rate limit, no slots, maintenance).
    KnownNonSuccess,
    /// A page we do not recognise. Treated like a non-success.
    UnknownNonSuccess,
    /// The fetch failed before an observation could be formed.
    TransportError,
}

impl Outcome {
    /// Whether this outcome counts as a failure for the throttle.
    pub fn is_failure(self) -> bool {
        !matches!(self, Outcome::Success)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::Success => "success",
            Outcome::KnownNonSuccess => "known_non_success",
            Outcome::UnknownNonSuccess => "unknown_non_success",
            Outcome::TransportError => "transport_error",
        };
        f.write_str(s)
    }
}
