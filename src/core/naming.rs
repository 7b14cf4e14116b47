//! core::naming
//!
//! File naming rules for the catalog.
//!
//! # Features
//!
//! - Generate file-name slugs from submission titles
//! - Deterministic: the same title always yields the same slug

/// Generate a file-name slug from a submission title.
///
/// Converts the first line of a title into a safe catalog file name:
/// - Lowercase
/// - Spaces and underscores become hyphens
/// - Remove invalid characters
/// - Collapse hyphen runs
/// - Truncate to reasonable length
///
/// # Example
///
/// ```
/// use catalog_intake::core::naming::slugify;
///
/// assert_eq!(slugify("My Great Rule!"), "my-great-rule");
/// assert_eq!(slugify("Deploy Helper"), "deploy-helper");
/// ```
pub fn slugify(title: &str) -> String {
    let first_line = title.lines().next().unwrap_or("");

    first_line
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else if c == ' ' || c == '_' || c == '-' {
                '-'
            } else {
                // Skip invalid characters
                '\0'
            }
        })
        .filter(|&c| c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .take(50) // Reasonable max length
        .collect()
}
