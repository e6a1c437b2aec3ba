//! Field rules shared by the contact form and the `/api/contact` handler.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use validator::ValidationError;

// Presence of `@` and `.` between non-space runs, nothing stricter.
// U+FEFF counts as space too.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\s\x{FEFF}]+@[^\s\x{FEFF}]+\.[^\s\x{FEFF}]+")
        .expect("email pattern is a valid regex")
});

fn is_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

pub fn is_blank(value: &str) -> bool {
    value.trim_matches(is_space).is_empty()
}

fn failure(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

pub fn name_rule(name: &str) -> Result<(), ValidationError> {
    if is_blank(name) {
        return Err(failure("required", "Name is required."));
    }
    Ok(())
}

pub fn email_rule(email: &str) -> Result<(), ValidationError> {
    if is_blank(email) {
        return Err(failure("required", "Email is required."));
    }
    if !is_valid_email(email) {
        return Err(failure("email", "Email is invalid."));
    }
    Ok(())
}

pub fn message_rule(message: &str) -> Result<(), ValidationError> {
    if is_blank(message) {
        return Err(failure("required", "Message is required."));
    }
    Ok(())
}
