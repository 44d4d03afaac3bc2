//! Whitespace normalization for scraped text

/// Collapses every run of whitespace into a single space and trims the edges
///
/// Newlines, tabs and Unicode spaces all count as whitespace, so text pulled
/// out of nested markup ends up on one line.
///
/// # Example
///
/// ```
/// use course_scout::extract::normalize;
///
/// assert_eq!(normalize("  Intro\n\tto   AI "), "Intro to AI");
/// ```
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
