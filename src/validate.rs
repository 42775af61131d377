use lazy_static::lazy_static;
use regex::Regex;

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Returns the trimmed value, or pushes `message` and returns an empty string.
/// Callers bail out on a non-empty error list before using the values.
pub fn require_field(value: Option<&str>, message: &str, errors: &mut Vec<String>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => {
            errors.push(message.to_string());
            String::new()
        }
    }
}

/// Splits a comma-delimited skills string into trimmed tags.
/// Order and duplicates are preserved as typed; empty segments are dropped.
pub fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("dev@example.com"));
        assert!(is_valid_email("first.last@sub.domain.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("spaces in@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn require_field_collects_messages_in_order() {
        let mut errors = Vec::new();
        let title = require_field(Some("Engineer"), "Title is required", &mut errors);
        let company = require_field(None, "Company is required", &mut errors);
        let from = require_field(Some("   "), "From date is required", &mut errors);
        assert_eq!(title, "Engineer");
        assert_eq!(company, "");
        assert_eq!(from, "");
        assert_eq!(errors, vec!["Company is required", "From date is required"]);
    }

    #[test]
    fn require_field_trims_the_value() {
        let mut errors = Vec::new();
        let v = require_field(Some("  Developer  "), "Status is required", &mut errors);
        assert_eq!(v, "Developer");
        assert!(errors.is_empty());
    }

    #[test]
    fn splits_and_trims_skills() {
        assert_eq!(split_skills("js, css , rust"), vec!["js", "css", "rust"]);
    }

    #[test]
    fn skills_keep_duplicates_and_order() {
        assert_eq!(split_skills("js,css,js"), vec!["js", "css", "js"]);
    }

    #[test]
    fn skills_drop_empty_segments() {
        assert_eq!(split_skills("js,,  ,css,"), vec!["js", "css"]);
        assert!(split_skills("").is_empty());
    }
}
