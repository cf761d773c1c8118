//! Field validation and tag normalization for bookmark input.
//!
//! Everything here is pure. Invalid input is rejected, never repaired: a url
//! without a scheme is an error, not an invitation to prepend `https://`.

use url::Url;

use crate::types::errors::ValidationError;

/// Checks the required bookmark fields.
///
/// Returns the first failure in field order: title, then url.
pub fn validate(title: &str, url: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::MissingTitle);
    }
    if url.trim().is_empty() {
        return Err(ValidationError::MissingUrl);
    }
    validate_url(url)
}

/// Requires an absolute URL with a scheme and a host.
pub fn validate_url(url: &str) -> Result<(), ValidationError> {
    let parsed = Url::parse(url).map_err(|e| ValidationError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    if !parsed.has_host() {
        return Err(ValidationError::InvalidUrl {
            url: url.to_string(),
            reason: "missing host".to_string(),
        });
    }
    Ok(())
}

/// Trims each tag and drops the empty ones. Order and duplicates are kept.
pub fn normalize_tags<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    tags.iter()
        .map(|t| t.as_ref().trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses a comma-separated tag field such as `"search, tools, work"`.
pub fn parse_tag_input(input: &str) -> Vec<String> {
    let parts: Vec<&str> = input.split(',').collect();
    normalize_tags(&parts)
}

/// Inverse of [`parse_tag_input`] for pre-filling an edit form.
pub fn format_tag_input<S: AsRef<str>>(tags: &[S]) -> String {
    tags.iter()
        .map(|t| t.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}
