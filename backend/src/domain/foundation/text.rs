//! Bounded free-text validation.

use super::ValidationError;

/// Trims `value` and checks its length in characters is within `min..=max`.
pub fn bounded_text(
    field: &str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if len == 0 && min > 0 {
        return Err(ValidationError::empty_field(field));
    }
    if len < min || len > max {
        return Err(ValidationError::out_of_range(field, min as i64, max as i64, len as i64));
    }
    Ok(trimmed.to_string())
}

/// Like [`bounded_text`] but maps blank input to `None`.
pub fn optional_text(
    field: &str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => bounded_text(field, v, 1, max).map(Some),
    }
}
