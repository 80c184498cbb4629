//! Check-in / check-out date extraction.
//!
//! Positional heuristic: the first date-shaped substring in the document is
//! taken as check-in and the second as check-out. Nothing anchors them to
//! "check-in"/"check-out" labels, so an earlier issue date or deadline will
//! be picked up instead. Matches are raw text and are not validated as
//! calendar dates.

use serde::{Deserialize, Serialize};

use super::patterns::PatternLibrary;
use super::FieldExtractor;

/// The two stay dates, as matched in the text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePair {
    /// First date match.
    pub check_in: Option<String>,
    /// Second date match.
    pub check_out: Option<String>,
}

/// Date field extractor.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Date-shaped substrings in document order, without deduplication.
    pub fn candidates<'t>(
        &self,
        text: &'t str,
        patterns: &'t PatternLibrary,
    ) -> impl Iterator<Item = &'t str> + 't {
        patterns.date.find_iter(text).map(|m| m.as_str().trim())
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = DatePair;

    fn extract(&self, text: &str, patterns: &PatternLibrary) -> Option<Self::Output> {
        let pair = extract_dates(text, patterns);
        pair.check_in.is_some().then_some(pair)
    }
}

/// Extract the check-in/check-out pair from text.
///
/// Only the first two matches are read; any further dates are ignored.
pub fn extract_dates(text: &str, patterns: &PatternLibrary) -> DatePair {
    let extractor = DateExtractor::new();
    let mut dates = extractor.candidates(text, patterns).map(str::to_string);

    DatePair {
        check_in: dates.next(),
        check_out: dates.next(),
    }
}
