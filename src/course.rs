//! Course records produced by the crawler
//!
//! A [`CourseRecord`] is built once per detail page and never mutated
//! afterwards. Missing page content is represented by the sentinel constants
//! below rather than by `Option`, so every record carries printable values.

use serde::{Deserialize, Serialize};

/// Placeholder for a title or description that could not be extracted
pub const NOT_AVAILABLE: &str = "N/A";

/// Appended after the last kept curriculum item when the course has more
pub const CURRICULUM_OVERFLOW: &str = "...and many more";

/// Sole curriculum entry when the page has no curriculum section at all
pub const NO_CURRICULUM: &str = "No available for this course";

/// Maximum number of real curriculum items kept per course
pub const CURRICULUM_LIMIT: usize = 10;

/// Fields extracted from a single course detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDetails {
    pub title: String,
    pub description: String,
    pub curriculum: Vec<String>,
}

impl CourseDetails {
    /// Attaches the detail page URL, producing the final record
    pub fn into_record(self, url: String) -> CourseRecord {
        CourseRecord {
            title: self.title,
            url,
            description: self.description,
            curriculum: self.curriculum,
        }
    }
}

/// One course from the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Course title, or [`NOT_AVAILABLE`]
    pub title: String,

    /// Absolute detail page URL
    pub url: String,

    /// Long-form description, or [`NOT_AVAILABLE`]
    pub description: String,

    /// At most [`CURRICULUM_LIMIT`] items plus an optional overflow marker
    pub curriculum: Vec<String>,
}

impl CourseRecord {
    /// Returns true if the curriculum was cut at [`CURRICULUM_LIMIT`] items
    pub fn curriculum_truncated(&self) -> bool {
        self.curriculum.last().map(String::as_str) == Some(CURRICULUM_OVERFLOW)
    }

    /// Returns true if the detail page had no curriculum section
    pub fn has_curriculum(&self) -> bool {
        !(self.curriculum.len() == 1 && self.curriculum[0] == NO_CURRICULUM)
    }
}
