use std::sync::OnceLock;

use regex::Regex;

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"(?i)^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid")
    })
}

/// Check whether a string looks like an email address. Empty input is invalid.
pub fn is_valid_email_address(source: &str) -> bool {
    if source.is_empty() {
        return false;
    }

    email_regex().is_match(source)
}
