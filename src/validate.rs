//! Request field validation helpers.
//!
//! Handlers call these before touching the database so that bad input is
//! rejected with a field-specific message instead of a database error.

use crate::error::AppError;

/// Structural email check: exactly one '@', a non-empty local part, and a
/// domain containing a dot, with no whitespace anywhere.
///
/// This is deliberately not RFC 5322. It catches the obviously broken
/// addresses; deliverability is the mail server's problem.
pub fn validate_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // Domain needs at least "x.y" with neither side empty
    match domain.split_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Check a set of (field name, value) pairs for missing input.
///
/// A value counts as missing when it is absent or blank after trimming.
/// Returns `Ok(())` when every field is present, otherwise
/// `AppError::MissingFields` with one "Please enter your {field}" message
/// per offending field, in the order given.
pub fn require_fields(fields: &[(&str, Option<&str>)]) -> Result<(), AppError> {
    let missing: Vec<String> = fields
        .iter()
        .filter(|(_, value)| value.map_or(true, |v| v.trim().is_empty()))
        .map(|(name, _)| format!("Please enter your {name}"))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::MissingFields(missing))
    }
}

/// Collapse runs of inner whitespace and trim the ends.
///
/// Keeps stored names tidy so that "My   Cafe " and "My Cafe" are the
/// same business name.
pub fn normalize_spaces(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
