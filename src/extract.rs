use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

pub const EXPECTED_DOMAIN: &str = "4d.rtvslo.si/";

// ASCII digits only; `\d` would also accept other Unicode decimal digits.
static RECORDING_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/([0-9]{5,})").expect("recording id pattern is valid"));

/// Numeric recording identifier taken from a 4D page URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingId(String);

impl RecordingId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn contains_expected_domain(url: &str) -> bool {
    url.contains(EXPECTED_DOMAIN)
}

/// Returns the digit run of the leftmost `/` followed by at least five digits.
pub fn extract_recording_id(url: &str) -> Option<RecordingId> {
    RECORDING_ID_RE
        .captures(url)
        .and_then(|captures| captures.get(1))
        .map(|digits| RecordingId(digits.as_str().to_string()))
}
