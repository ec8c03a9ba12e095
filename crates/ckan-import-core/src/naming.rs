//! Dataset name derivation.

/// Maximum length CKAN accepts for a dataset name.
pub const MAX_NAME_LEN: usize = 100;

/// Converts a dataset title into a CKAN dataset name.
///
/// The result is trimmed, lowercased, has spaces replaced with `-`, keeps only
/// `[a-z0-9_-]` and is at most [`MAX_NAME_LEN`] characters long. Truncation
/// happens last so the length bound holds for the final value.
///
/// # Examples
///
/// ```
/// use ckan_import_core::derive_name;
///
/// assert_eq!(derive_name("My Report"), "my-report");
/// assert_eq!(derive_name("Q1 Report!!"), "q1-report");
/// ```
pub fn derive_name(title: &str) -> String {
    title
        .trim()
        .to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .take(MAX_NAME_LEN)
        .collect()
}
