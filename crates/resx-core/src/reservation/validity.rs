//! Validity classification of extracted reservation fields.
//!
//! The reservation-number rule is stricter than the extractor: a dashed code
//! such as `ABCDE12345-XY` is extracted but still fails here because the
//! whole string must be 5-10 characters.

use tracing::debug;

use crate::models::reservation::{ExtractedFields, ValidityVerdict};

use super::rules::PatternLibrary;

/// A single validity rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidityRule {
    /// Resort name present, at least 3 characters, contains a letter.
    ResortName,
    /// Reservation number present and 5-10 of `A-Z`, `0-9`, `-`.
    ReservationNumber,
    /// Email present and shaped like `local@domain.tld`.
    Email,
}

impl ValidityRule {
    /// All rules in evaluation (and reporting) order.
    pub const ALL: [ValidityRule; 3] = [
        ValidityRule::ResortName,
        ValidityRule::ReservationNumber,
        ValidityRule::Email,
    ];

    /// Reason reported when the rule fails.
    pub fn reason(&self) -> &'static str {
        match self {
            ValidityRule::ResortName => "Invalid or missing resort name",
            ValidityRule::ReservationNumber => "Invalid or missing reservation number",
            ValidityRule::Email => "Invalid or missing email address",
        }
    }

    /// Check whether the fields satisfy this rule.
    pub fn passes(&self, fields: &ExtractedFields, patterns: &PatternLibrary) -> bool {
        match self {
            ValidityRule::ResortName => fields.resort_name.as_deref().is_some_and(|name| {
                name.chars().count() >= 3 && name.chars().any(|c| c.is_ascii_alphabetic())
            }),
            ValidityRule::ReservationNumber => fields
                .reservation_number
                .as_deref()
                .is_some_and(|number| patterns.reservation_number_shape.is_match(number)),
            ValidityRule::Email => fields
                .email
                .as_deref()
                .is_some_and(|email| patterns.email_shape.is_match(email)),
        }
    }
}

/// Applies the fixed rule set to extracted fields.
pub struct ValidityClassifier<'p> {
    patterns: &'p PatternLibrary,
}

impl ValidityClassifier<'static> {
    /// Create a classifier using the process-wide patterns.
    pub fn new() -> Self {
        Self::with_patterns(PatternLibrary::global())
    }
}

impl<'p> ValidityClassifier<'p> {
    /// Create a classifier using the given patterns.
    pub fn with_patterns(patterns: &'p PatternLibrary) -> Self {
        Self { patterns }
    }

    /// Evaluate every rule and collect the failures in rule order.
    pub fn classify(&self, fields: &ExtractedFields) -> ValidityVerdict {
        let reasons: Vec<String> = ValidityRule::ALL
            .iter()
            .filter(|rule| !rule.passes(fields, self.patterns))
            .map(|rule| rule.reason().to_string())
            .collect();

        debug!("Validity check: {} rule(s) failed", reasons.len());

        ValidityVerdict::from_reasons(reasons)
    }
}

impl Default for ValidityClassifier<'static> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn valid_fields() -> ExtractedFields {
        ExtractedFields {
            resort_name: Some("Grand Palm Resort".to_string()),
            reservation_number: Some("ABCDE12345".to_string()),
            email: Some("a@b.com".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_record() {
        let verdict = ValidityClassifier::new().classify(&valid_fields());
        assert_eq!(
            verdict,
            ValidityVerdict {
                is_valid: true,
                reasons: Vec::new(),
            }
        );
    }

    #[test]
    fn test_missing_resort_only() {
        let fields = ExtractedFields {
            resort_name: None,
            ..valid_fields()
        };

        let verdict = ValidityClassifier::new().classify(&fields);
        assert!(!verdict.is_valid);
        assert_eq!(verdict.reasons, vec!["Invalid or missing resort name"]);
    }

    #[test]
    fn test_all_rules_fail_in_order() {
        let verdict = ValidityClassifier::new().classify(&ExtractedFields::default());
        assert_eq!(
            verdict.reasons,
            vec![
                "Invalid or missing resort name",
                "Invalid or missing reservation number",
                "Invalid or missing email address",
            ]
        );
    }

    #[test]
    fn test_resort_name_rule() {
        let classifier = ValidityClassifier::new();

        for name in ["Inn", "Spa Hotel"] {
            let fields = ExtractedFields {
                resort_name: Some(name.to_string()),
                ..valid_fields()
            };
            assert!(classifier.classify(&fields).is_valid, "{name}");
        }

        for name in ["In", "123 4567"] {
            let fields = ExtractedFields {
                resort_name: Some(name.to_string()),
                ..valid_fields()
            };
            assert!(!classifier.classify(&fields).is_valid, "{name}");
        }
    }

    #[test]
    fn test_dashed_code_longer_than_ten_fails() {
        let fields = ExtractedFields {
            reservation_number: Some("ABCDE12345-XY".to_string()),
            ..valid_fields()
        };

        let verdict = ValidityClassifier::new().classify(&fields);
        assert_eq!(verdict.reasons, vec!["Invalid or missing reservation number"]);
    }

    #[test]
    fn test_reservation_number_shape() {
        let classifier = ValidityClassifier::new();

        for (number, ok) in [("ABC12-345", true), ("abc12345", false), ("AB12", false)] {
            let fields = ExtractedFields {
                reservation_number: Some(number.to_string()),
                ..valid_fields()
            };
            assert_eq!(classifier.classify(&fields).is_valid, ok, "{number}");
        }
    }

    #[test]
    fn test_email_shape() {
        let classifier = ValidityClassifier::new();

        for (email, ok) in [
            ("guest@example.com", true),
            ("guest@localhost", false),
            ("guest at example.com", false),
        ] {
            let fields = ExtractedFields {
                email: Some(email.to_string()),
                ..valid_fields()
            };
            assert_eq!(classifier.classify(&fields).is_valid, ok, "{email}");
        }
    }
}
