//! Resort name extraction.
//!
//! First-match heuristic: the topmost line that mentions a lodging keyword,
//! carries no navigation/marketing keyword, and has a sane length wins.

use tracing::trace;

use super::patterns::PatternLibrary;
use super::FieldExtractor;

/// Resort name extractor.
pub struct ResortExtractor {
    min_len: usize,
    max_len: usize,
}

impl ResortExtractor {
    pub fn new() -> Self {
        Self {
            min_len: 3,
            max_len: 60,
        }
    }

    fn accept(&self, line: &str, patterns: &PatternLibrary) -> bool {
        let lower = line.to_lowercase();

        if !patterns.has_resort_keyword(&lower) {
            return false;
        }

        if let Some(excluded) = patterns.exclude_keyword(&lower) {
            trace!("Skipping resort candidate {:?} (contains {:?})", line, excluded);
            return false;
        }

        let len = line.chars().count();
        (self.min_len..=self.max_len).contains(&len) && line.chars().any(|c| c.is_ascii_alphabetic())
    }
}

impl Default for ResortExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ResortExtractor {
    type Output = String;

    fn extract(&self, text: &str, patterns: &PatternLibrary) -> Option<Self::Output> {
        text.split('\n')
            .map(str::trim)
            .find(|line| self.accept(line, patterns))
            .map(str::to_string)
    }
}

/// Extract the resort name from text.
pub fn extract_resort_name(text: &str, patterns: &PatternLibrary) -> Option<String> {
    ResortExtractor::new().extract(text, patterns)
}
