//! Rule-based field extractors for reservation documents.
//!
//! Each extractor is a pure function of the document text and a
//! [`PatternLibrary`]; none depends on another's result.

pub mod reservation_number;
pub mod email;
pub mod resort;
pub mod dates;
pub mod cost;
pub mod patterns;

pub use reservation_number::{extract_reservation_number, ReservationNumberExtractor};
pub use email::{extract_email, EmailExtractor};
pub use resort::{extract_resort_name, ResortExtractor};
pub use dates::{extract_dates, DateExtractor, DatePair};
pub use cost::{extract_total_cost, CostExtractor};
pub use patterns::PatternLibrary;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text, or `None` when nothing qualifies.
    fn extract(&self, text: &str, patterns: &PatternLibrary) -> Option<Self::Output>;
}
