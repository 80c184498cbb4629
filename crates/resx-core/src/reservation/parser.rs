//! Reservation parser running every field extractor over one document text.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::models::reservation::{ExtractedFields, ValidityVerdict};

use super::rules::{
    CostExtractor, DateExtractor, EmailExtractor, FieldExtractor, PatternLibrary,
    ResortExtractor, ReservationNumberExtractor,
};
use super::validity::ValidityClassifier;
use super::ReservationExtractor;

/// Result of reservation extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Extracted fields.
    pub fields: ExtractedFields,
    /// Validity verdict for the fields.
    pub verdict: ValidityVerdict,
    /// Length of the input text in characters.
    pub text_length: usize,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Rule-based reservation parser.
pub struct ReservationParser<'p> {
    patterns: &'p PatternLibrary,
    reservation_number: ReservationNumberExtractor,
    email: EmailExtractor,
    resort: ResortExtractor,
    dates: DateExtractor,
    cost: CostExtractor,
    classifier: ValidityClassifier<'p>,
}

impl ReservationParser<'static> {
    /// Create a parser using the process-wide patterns.
    pub fn new() -> Self {
        Self::with_patterns(PatternLibrary::global())
    }
}

impl<'p> ReservationParser<'p> {
    /// Create a parser using the given patterns.
    pub fn with_patterns(patterns: &'p PatternLibrary) -> Self {
        Self {
            patterns,
            reservation_number: ReservationNumberExtractor::new(),
            email: EmailExtractor::new(),
            resort: ResortExtractor::new(),
            dates: DateExtractor::new(),
            cost: CostExtractor::new(),
            classifier: ValidityClassifier::with_patterns(patterns),
        }
    }

    /// Set how many lines below a reservation label are searched for the code.
    pub fn with_lookahead(mut self, lines: usize) -> Self {
        self.reservation_number = self.reservation_number.with_lookahead(lines);
        self
    }
}

impl Default for ReservationParser<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl ReservationExtractor for ReservationParser<'_> {
    fn extract_fields(&self, text: &str) -> ExtractedFields {
        let patterns = self.patterns;
        let dates = self.dates.extract(text, patterns).unwrap_or_default();

        let fields = ExtractedFields {
            resort_name: self.resort.extract(text, patterns),
            check_in: dates.check_in,
            check_out: dates.check_out,
            total_cost: self.cost.extract(text, patterns),
            reservation_number: self.reservation_number.extract(text, patterns),
            email: self.email.extract(text, patterns),
        };

        if fields.is_empty() {
            warn!("No reservation fields found in {} characters of text", text.chars().count());
        } else {
            let missing = fields.missing_fields();
            if !missing.is_empty() {
                debug!("Fields not found: {}", missing.join(", "));
            }
        }

        fields
    }

    fn classify(&self, fields: &ExtractedFields) -> ValidityVerdict {
        self.classifier.classify(fields)
    }

    fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();
        let text_length = text.chars().count();

        info!("Parsing reservation from {} characters of text", text_length);

        let fields = self.extract_fields(text);
        let verdict = self.classify(&fields);

        debug!(
            "Reservation {} is {}",
            fields.reservation_number.as_deref().unwrap_or("<none>"),
            if verdict.is_valid { "valid" } else { "invalid" }
        );

        ExtractionResult {
            fields,
            verdict,
            text_length,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}
