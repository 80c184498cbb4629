//! Reservation data models.

use serde::{Deserialize, Serialize};

/// Reservation fields pulled out of a document's text.
///
/// Every field is independently optional. Values are raw substrings of the
/// source text, trimmed; dates and amounts are not parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    /// First qualifying line that looks like a resort or hotel name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resort_name: Option<String>,

    /// First date-shaped substring in the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in: Option<String>,

    /// Second date-shaped substring in the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out: Option<String>,

    /// First currency amount, whitespace removed (e.g. `$1,234.56`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<String>,

    /// Booking or confirmation code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation_number: Option<String>,

    /// Contact email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ExtractedFields {
    /// Fields paired with their human-readable labels, in report order.
    pub fn labeled(&self) -> [(&'static str, Option<&str>); 6] {
        [
            ("Resort Name", self.resort_name.as_deref()),
            ("Check-in Date", self.check_in.as_deref()),
            ("Check-out Date", self.check_out.as_deref()),
            ("Total Cost", self.total_cost.as_deref()),
            ("Reservation Number", self.reservation_number.as_deref()),
            ("Email", self.email.as_deref()),
        ]
    }

    /// Labels of the fields that could not be extracted.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.labeled()
            .into_iter()
            .filter(|(_, value)| value.is_none())
            .map(|(label, _)| label)
            .collect()
    }

    /// Check if nothing at all was extracted.
    pub fn is_empty(&self) -> bool {
        self.missing_fields().len() == self.labeled().len()
    }
}

/// Outcome of the validity check on a set of extracted fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityVerdict {
    /// True when every rule passed.
    pub is_valid: bool,

    /// Failure reasons in rule order; empty when valid.
    #[serde(default)]
    pub reasons: Vec<String>,
}

impl ValidityVerdict {
    /// Build a verdict from the reasons collected by the rules.
    pub fn from_reasons(reasons: Vec<String>) -> Self {
        Self {
            is_valid: reasons.is_empty(),
            reasons,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_fields() {
        let fields = ExtractedFields {
            resort_name: Some("Grand Palm Resort".to_string()),
            email: Some("guest@example.com".to_string()),
            ..Default::default()
        };

        assert_eq!(
            fields.missing_fields(),
            vec![
                "Check-in Date",
                "Check-out Date",
                "Total Cost",
                "Reservation Number"
            ]
        );
        assert!(!fields.is_empty());
        assert!(ExtractedFields::default().is_empty());
    }

    #[test]
    fn test_verdict_from_reasons() {
        assert!(ValidityVerdict::from_reasons(Vec::new()).is_valid);

        let verdict = ValidityVerdict::from_reasons(vec!["Invalid or missing email address".into()]);
        assert!(!verdict.is_valid);
        assert_eq!(verdict.reasons.len(), 1);
    }

    #[test]
    fn test_serialization_skips_absent_fields() {
        let fields = ExtractedFields {
            total_cost: Some("$99".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_string(&fields).unwrap();
        assert_eq!(json, r#"{"total_cost":"$99"}"#);
    }
}
