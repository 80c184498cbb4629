//! Total cost extraction.

use super::patterns::PatternLibrary;
use super::FieldExtractor;

/// Cost field extractor.
///
/// Returns the first currency amount in the document as raw text with its
/// whitespace removed. Decimal and thousands separators are left as written.
pub struct CostExtractor;

impl CostExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CostExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CostExtractor {
    type Output = String;

    fn extract(&self, text: &str, patterns: &PatternLibrary) -> Option<Self::Output> {
        patterns
            .cost
            .find(text)
            .map(|m| m.as_str().chars().filter(|c| !c.is_whitespace()).collect())
    }
}

/// Extract the total cost from text.
pub fn extract_total_cost(text: &str, patterns: &PatternLibrary) -> Option<String> {
    CostExtractor::new().extract(text, patterns)
}
