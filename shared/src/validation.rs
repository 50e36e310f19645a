//! Input validation helpers
//!
//! Text length limits and the checks run on form input before anything is
//! sent to the backend. The backend re-validates; these exist so a form can
//! show an inline message without a round-trip.

use crate::error::ValidationError;

// ── Text length limits ──────────────────────────────────────────────

/// Names: complaint titles, department names, people
pub const MAX_NAME_LEN: usize = 200;

/// Complaint descriptions, department descriptions
pub const MAX_NOTE_LEN: usize = 2000;

/// Short identifiers: phone numbers, reference ids
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Minimum password length accepted on registration / password change
pub const MIN_PASSWORD_LEN: usize = 6;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(
    value: &str,
    field: &'static str,
    max_len: usize,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, format!("{field} is required")));
    }
    if value.chars().count() > max_len {
        return Err(ValidationError::new(
            field,
            format!(
                "{field} is too long ({} chars, max {max_len})",
                value.chars().count()
            ),
        ));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &'static str,
    max_len: usize,
) -> Result<(), ValidationError> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(ValidationError::new(
            field,
            format!("{field} is too long ({} chars, max {max_len})", v.chars().count()),
        ));
    }
    Ok(())
}

/// Minimal shape check: one `@` with something on both sides.
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    validate_required_text(value, "email", MAX_EMAIL_LEN)?;
    match value.trim().split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ValidationError::new("email", "email address is not valid")),
    }
}

pub fn validate_password(value: &str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(ValidationError::new(
            "password",
            format!("password must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    if len > MAX_PASSWORD_LEN {
        return Err(ValidationError::new(
            "password",
            format!("password is too long (max {MAX_PASSWORD_LEN})"),
        ));
    }
    Ok(())
}
