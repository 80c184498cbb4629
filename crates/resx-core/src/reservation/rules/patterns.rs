//! Regex patterns and keyword lists for reservation extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Words that mark a line as a possible resort or hotel name.
pub const RESORT_KEYWORDS: &[&str] = &[
    "resort", "hotel", "club", "inn", "lodge", "villa", "motel", "suite",
];

/// Words that mark a line as navigation or marketing text, not a property name.
pub const EXCLUDE_KEYWORDS: &[&str] = &[
    "benefits", "ownerguide", "deals", "offers", "help", "summary", "gmail",
];

lazy_static! {
    static ref PATTERNS: PatternLibrary = PatternLibrary::new();
}

/// Compiled patterns shared by every field extractor.
///
/// Build it once (or use [`PatternLibrary::global`]) and pass it by reference;
/// nothing mutates it after construction.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    /// Label that precedes a booking code, e.g. "Confirmation Number:".
    pub reservation_keywords: Regex,

    /// Shape of a booking code: 5-10 uppercase alphanumerics, optional dash suffix.
    pub code: Regex,

    /// Lowercase substrings that suggest a property name.
    pub resort_keywords: &'static [&'static str],

    /// Lowercase substrings that disqualify a property-name candidate.
    pub exclude_keywords: &'static [&'static str],

    /// Numeric D/M/Y, textual "D Month, Y", or Y/M/D dates.
    pub date: Regex,

    /// Currency symbol followed by an amount.
    pub cost: Regex,

    /// Loose email address pattern.
    pub email: Regex,

    /// Full-string shape a valid reservation number must have.
    pub reservation_number_shape: Regex,

    /// Full-string shape a valid email address must have.
    pub email_shape: Regex,
}

impl PatternLibrary {
    /// Compile the pattern set.
    pub fn new() -> Self {
        Self {
            reservation_keywords: Regex::new(
                r"(?i)\b(?:confirmation number|confirmation|reservation number|reservation|booking reference|booking|res\s*#?)\b[:\s\-]*",
            )
            .unwrap(),
            code: Regex::new(r"\b([A-Z0-9]{5,10}-?[A-Z0-9]{0,5})\b").unwrap(),
            resort_keywords: RESORT_KEYWORDS,
            exclude_keywords: EXCLUDE_KEYWORDS,
            date: Regex::new(
                r"\d{1,2}[/-]\d{1,2}[/-]\d{2,4}|\d{1,2} ?[A-Za-z]{3,9}[, ]+\d{2,4}|\d{4}[/-]\d{1,2}[/-]\d{1,2}",
            )
            .unwrap(),
            cost: Regex::new(r"[$€£]\s*\d{1,3}[,\d]{0,12}(?:\.\d{1,2})?").unwrap(),
            email: Regex::new(r"[\w.-]+@[\w.-]+\.\w+").unwrap(),
            reservation_number_shape: Regex::new(r"^[A-Z0-9-]{5,10}$").unwrap(),
            email_shape: Regex::new(r"^[\w.-]+@[\w.-]+\.\w+$").unwrap(),
        }
    }

    /// Process-wide instance, compiled on first use.
    pub fn global() -> &'static PatternLibrary {
        &PATTERNS
    }

    /// Check a lowercased line for any resort keyword.
    pub fn has_resort_keyword(&self, lower: &str) -> bool {
        self.resort_keywords.iter().any(|kw| lower.contains(kw))
    }

    /// First exclude keyword found in a lowercased line.
    pub fn exclude_keyword(&self, lower: &str) -> Option<&'static str> {
        self.exclude_keywords
            .iter()
            .copied()
            .find(|kw| lower.contains(kw))
    }
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::new()
    }
}
