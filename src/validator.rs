//! Field predicates shared by the auth form and the onboarding wizard.

use regex::Regex;

const EMAIL_PATTERN: &str =
    r"^[a-zA-Z0-9.!#$%&’*+/=?^_`{|}~-]+@[a-zA-Z0-9-]+(?:\.[a-zA-Z0-9-]+)*$";

/// Email format check. The domain part may omit a dot (`admin@localhost` passes).
pub fn is_email(value: &str) -> bool {
    Regex::new(EMAIL_PATTERN).is_ok_and(|regex| regex.is_match(value))
}

pub fn not_empty(value: &str) -> bool {
    !value.is_empty()
}

/// Length in characters, not bytes. Callers trim first when whitespace must not count.
pub fn min_length(value: &str, length: usize) -> bool {
    value.chars().count() >= length
}

/// Both values present and identical.
pub fn pass_match(password: &str, confirmation: &str) -> bool {
    not_empty(password) && not_empty(confirmation) && password == confirmation
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_email_accepts_common_addresses() {
        assert!(is_email("a@b.com"));
        assert!(is_email("first.last+tag@example.co.uk"));
        assert!(is_email("admin@localhost"));
    }

    #[test]
    fn is_email_rejects_malformed_input() {
        assert!(!is_email("not-an-email"));
        assert!(!is_email(""));
        assert!(!is_email("a@"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("a b@example.com"));
        assert!(!is_email("a@example..com"));
    }

    #[test]
    fn min_length_counts_characters() {
        assert!(min_length("Jo", 2));
        assert!(!min_length("J", 2));
        assert!(min_length("Zoë", 3));
        assert!(!min_length("", 1));
    }

    #[test]
    fn pass_match_requires_both_values() {
        assert!(pass_match("hunter22", "hunter22"));
        assert!(!pass_match("hunter22", "hunter23"));
        assert!(!pass_match("", ""));
    }
}
