//! Reservation number extraction.
//!
//! Booking codes usually sit next to a label ("Confirmation Number: ABC123")
//! or directly below it. A labeled line is searched first, then a short
//! window of the lines that follow.

use tracing::trace;

use super::patterns::PatternLibrary;
use super::FieldExtractor;

/// Lines searched below a label when the label line has no code.
pub const DEFAULT_LOOKAHEAD: usize = 3;

/// Reservation number extractor.
pub struct ReservationNumberExtractor {
    lookahead: usize,
}

impl ReservationNumberExtractor {
    /// Create a new extractor with the default lookahead window.
    pub fn new() -> Self {
        Self {
            lookahead: DEFAULT_LOOKAHEAD,
        }
    }

    /// Set how many lines below a label are searched.
    pub fn with_lookahead(mut self, lines: usize) -> Self {
        self.lookahead = lines;
        self
    }
}

impl Default for ReservationNumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ReservationNumberExtractor {
    type Output = String;

    fn extract(&self, text: &str, patterns: &PatternLibrary) -> Option<Self::Output> {
        let lines: Vec<&str> = text.split('\n').collect();

        lines
            .iter()
            .enumerate()
            .filter(|(_, line)| patterns.reservation_keywords.is_match(line))
            .find_map(|(i, line)| {
                find_code(line, patterns).or_else(|| {
                    trace!("No code on label line {}, searching next {} lines", i + 1, self.lookahead);
                    lines[i + 1..]
                        .iter()
                        .take(self.lookahead)
                        .find_map(|next| find_code(next.trim(), patterns))
                })
            })
    }
}

fn find_code(line: &str, patterns: &PatternLibrary) -> Option<String> {
    patterns
        .code
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Extract a reservation number from text.
pub fn extract_reservation_number(text: &str, patterns: &PatternLibrary) -> Option<String> {
    ReservationNumberExtractor::new().extract(text, patterns)
}
