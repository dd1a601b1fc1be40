//! Field-level checks used by the request types before anything is persisted.

use crate::errors::{FramedError, FramedResult};

/// Rejects blank values and values longer than `max_len` characters.
pub fn require_text(field: &str, value: &str, max_len: usize) -> FramedResult<()> {
    if value.trim().is_empty() {
        return Err(FramedError::Validation(format!("{} must not be empty", field)));
    }
    if value.chars().count() > max_len {
        return Err(FramedError::Validation(format!(
            "{} must be at most {} characters",
            field, max_len
        )));
    }
    Ok(())
}

/// Loose e-mail shape check: one `@`, a non-empty local part and a dotted domain.
pub fn validate_email(field: &str, value: &str) -> FramedResult<()> {
    require_text(field, value, 254)?;

    let invalid = || FramedError::Validation(format!("{} must be a valid email address", field));
    let (local, domain) = value.trim().split_once('@').ok_or_else(invalid)?;

    if local.is_empty()
        || domain.contains('@')
        || domain.starts_with('.')
        || domain.ends_with('.')
        || !domain.contains('.')
        || value.chars().any(char::is_whitespace)
    {
        return Err(invalid());
    }
    Ok(())
}

pub fn validate_rating(rating: i32) -> FramedResult<()> {
    if !(1..=5).contains(&rating) {
        return Err(FramedError::Validation(
            "Rating must be between 1 and 5".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_url(field: &str, value: &str) -> FramedResult<()> {
    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => Err(FramedError::Validation(format!("{} must be an http(s) URL", field))),
    }
}

/// Slugs are lowercase ASCII letters, digits, `-` and `_`.
pub fn validate_slug(value: &str) -> FramedResult<()> {
    require_text("Slug", value, 100)?;
    if !value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(FramedError::Validation(format!("Invalid slug: {}", value)));
    }
    Ok(())
}

/// Checks the extension of an uploaded file path, case-insensitively.
pub fn validate_extension(field: &str, path: &str, allowed: &[&str]) -> FramedResult<()> {
    let extension = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if allowed.iter().any(|allowed| *allowed == extension) {
        Ok(())
    } else {
        Err(FramedError::Validation(format!(
            "{} has an unsupported format (allowed: {})",
            field,
            allowed.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(validate_email("Email", "anna@example.com").is_ok());
        assert!(validate_email("Email", "anna@example").is_err());
        assert!(validate_email("Email", "@example.com").is_err());
        assert!(validate_email("Email", "anna@@example.com").is_err());
        assert!(validate_email("Email", "an na@example.com").is_err());
    }

    #[test]
    fn extension_is_case_insensitive() {
        assert!(validate_extension("Image", "covers/a.JPG", &["jpg"]).is_ok());
        assert!(validate_extension("Image", "covers/a", &["jpg"]).is_err());
        assert!(validate_extension("Image", "covers/a.gif", &["jpg", "png"]).is_err());
    }

    #[test]
    fn text_length_counts_characters() {
        assert!(require_text("Name", "Анна", 4).is_ok());
        assert!(require_text("Name", "   ", 4).is_err());
        assert!(require_text("Name", "Анна!", 4).is_err());
    }
}
