//! Registration input validation.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
}

/// Check an email address against the accepted pattern.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Password policy: at least 8 characters with one uppercase letter, one
/// lowercase letter, one digit, and one symbol (any non-word character).
pub fn password_meets_policy(password: &str) -> bool {
    if password.chars().count() < 8 {
        return false;
    }

    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password
        .chars()
        .any(|c| !(c.is_ascii_alphanumeric() || c == '_'));

    has_upper && has_lower && has_digit && has_symbol
}
