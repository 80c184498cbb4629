//! Email address extraction.

use tracing::trace;

use super::patterns::PatternLibrary;
use super::FieldExtractor;

/// Email field extractor.
pub struct EmailExtractor {
    min_len: usize,
}

impl EmailExtractor {
    pub fn new() -> Self {
        Self { min_len: 6 }
    }
}

impl Default for EmailExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for EmailExtractor {
    type Output = String;

    fn extract(&self, text: &str, patterns: &PatternLibrary) -> Option<Self::Output> {
        patterns
            .email
            .find_iter(text)
            .map(|m| m.as_str().trim())
            .find(|candidate| {
                let plausible = candidate.chars().count() >= self.min_len
                    && candidate
                        .rsplit('@')
                        .next()
                        .is_some_and(|domain| domain.contains('.'));
                if !plausible {
                    trace!("Rejected email candidate {:?}", candidate);
                }
                plausible
            })
            .map(str::to_string)
    }
}

/// Extract the first plausible email address from text.
pub fn extract_email(text: &str, patterns: &PatternLibrary) -> Option<String> {
    EmailExtractor::new().extract(text, patterns)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Option<String> {
        extract_email(text, PatternLibrary::global())
    }

    #[test]
    fn test_extract_email() {
        let text = "Guest: Jane Doe\nContact: jane.doe@example.com\nPhone: 555-0100";
        assert_eq!(extract(text), Some("jane.doe@example.com".to_string()));
    }

    #[test]
    fn test_first_plausible_email_wins() {
        let text = "a@b.c then reservations@palm-resort.com and help@palm-resort.com";
        assert_eq!(extract(text), Some("reservations@palm-resort.com".to_string()));
    }

    #[test]
    fn test_no_email() {
        assert_eq!(extract("no address here, just user@localhost"), None);
    }

    #[test]
    fn test_extracted_email_is_plausible() {
        let texts = [
            "x@y.z",
            "mail me: first.last@sub.domain.org.",
            "weird@@host.io",
            "a@b.co",
        ];

        for text in texts {
            if let Some(email) = extract(text) {
                assert!(email.chars().count() >= 6, "{email}");
                let domain = email.rsplit('@').next().unwrap();
                assert!(domain.contains('.'), "{email}");
            }
        }
    }
}
