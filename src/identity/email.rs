// Email gate - user identifier validation
//
// The resolved email is the partition key for every persisted record, so
// it is validated once at the session boundary. The shape check is
// intentionally loose (word chars, dots, dashes around a single '@');
// deliverability is not this system's concern.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.\-]+@[\w.\-]+\.\w+$").unwrap());

/// Check whether a string is an acceptable email-shaped identifier
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_addresses() {
        assert!(is_valid_email("alice@example.com"));
        assert!(is_valid_email("a.b-c_d@sub.domain.org"));
        assert!(is_valid_email("user123@mail.co"));
    }

    #[test]
    fn test_rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@domain"));
        assert!(!is_valid_email("user name@example.com"));
        assert!(!is_valid_email("user@example.com extra"));
    }
}
