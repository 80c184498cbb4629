//! Reservation field extraction and validity classification.

mod parser;
pub mod rules;
pub mod validity;

pub use parser::{ExtractionResult, ReservationParser};
pub use rules::PatternLibrary;
pub use validity::{ValidityClassifier, ValidityRule};

use crate::models::reservation::{ExtractedFields, ValidityVerdict};

/// Trait for reservation extractors.
///
/// Extraction never fails: a field that cannot be found is simply absent.
pub trait ReservationExtractor {
    /// Extract reservation fields from plain text.
    fn extract_fields(&self, text: &str) -> ExtractedFields;

    /// Decide whether extracted fields form a valid reservation record.
    fn classify(&self, fields: &ExtractedFields) -> ValidityVerdict;

    /// Extract and classify in one pass.
    fn parse(&self, text: &str) -> ExtractionResult;
}
