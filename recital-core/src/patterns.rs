use regex::Regex;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern"));

pub(crate) fn is_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// Shape check only (`YYYY-MM-DD`, ASCII digits); calendar validity is not enforced.
pub(crate) fn is_iso_date(value: &str) -> bool {
    ISO_DATE.is_match(value)
}

/// Treats missing and blank values the same way.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_pattern() {
        assert!(is_email("bookings@example.com"));
        assert!(!is_email("not-an-email"));
        assert!(!is_email("a b@example.com"));
        assert!(!is_email("a@example"));
    }

    #[test]
    fn test_date_pattern() {
        assert!(is_iso_date("2025-01-10"));
        assert!(!is_iso_date("2025-3-2"));
        assert!(!is_iso_date("2025-01-10T00:00:00Z"));
        // Arabic-Indic digits are Unicode `\d` but not ASCII.
        assert!(!is_iso_date("٢٠٢٥-٠١-١٠"));
    }
}
