//! Course detail page extraction
//!
//! Pulls the title, description and curriculum out of one course page.
//! Missing sections never fail the extraction; they fall back to the
//! sentinel values defined in [`crate::course`].

use crate::course::{
    CourseDetails, CURRICULUM_LIMIT, CURRICULUM_OVERFLOW, NOT_AVAILABLE, NO_CURRICULUM,
};
use crate::extract::normalize;
use scraper::{ElementRef, Html, Selector};

const TITLE_SELECTOR: &str = "h1.section__heading";
const DESCRIPTION_SELECTOR: &str = "div.rich-text__container";
const CURRICULUM_SELECTOR: &str = "div.course-curriculum__container";
const CURRICULUM_ITEM_SELECTOR: &str = "h5";

/// Extracts course details from a detail page's HTML
///
/// # Extraction Rules
///
/// | Field       | Source                                  | When absent                       |
/// |-------------|-----------------------------------------|-----------------------------------|
/// | title       | first `h1.section__heading`             | `"N/A"`                           |
/// | description | first `div.rich-text__container`        | `"N/A"`                           |
/// | curriculum  | `h5` items of `div.course-curriculum__container` | `["No available for this course"]` |
///
/// Only the first ten curriculum items are kept. If an eleventh exists,
/// `"...and many more"` is appended and the rest are dropped.
///
/// # Example
///
/// ```
/// use course_scout::extract::extract_course;
///
/// let html = r#"<h1 class="section__heading"> Intro
///     to AI </h1>"#;
/// let details = extract_course(html);
/// assert_eq!(details.title, "Intro to AI");
/// assert_eq!(details.description, "N/A");
/// ```
pub fn extract_course(html: &str) -> CourseDetails {
    let document = Html::parse_document(html);

    let title = first_text(&document, TITLE_SELECTOR).unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let description =
        first_text(&document, DESCRIPTION_SELECTOR).unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let curriculum = extract_curriculum(&document);

    CourseDetails {
        title,
        description,
        curriculum,
    }
}

/// Normalized text of the first element matching `css`
fn first_text(document: &Html, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    document.select(&selector).next().map(element_text)
}

fn extract_curriculum(document: &Html) -> Vec<String> {
    let container = Selector::parse(CURRICULUM_SELECTOR)
        .ok()
        .and_then(|selector| document.select(&selector).next());

    let Some(container) = container else {
        return vec![NO_CURRICULUM.to_string()];
    };

    let Ok(item_selector) = Selector::parse(CURRICULUM_ITEM_SELECTOR) else {
        return vec![NO_CURRICULUM.to_string()];
    };

    let mut curriculum = Vec::new();
    for (idx, item) in container.select(&item_selector).enumerate() {
        if idx == CURRICULUM_LIMIT {
            curriculum.push(CURRICULUM_OVERFLOW.to_string());
            break;
        }
        curriculum.push(element_text(item));
    }

    curriculum
}

fn element_text(element: ElementRef<'_>) -> String {
    normalize(&element.text().collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with_curriculum(items: usize) -> String {
        let headings: String = (1..=items)
            .map(|i| format!("<div class=\"chapter\"><h5>\n  Chapter {}\n</h5></div>", i))
            .collect();
        format!(
            r#"<html><body>
            <h1 class="section__heading">Course</h1>
            <div class="course-curriculum__container">{}</div>
            </body></html>"#,
            headings
        )
    }

    #[test]
    fn test_extracts_all_fields() {
        let html = r#"
            <html><body>
            <h1 class="section__heading">
                Getting Started
                with Python
            </h1>
            <div class="rich-text__container">
                <p>Learn the basics.</p>
                <p>No prior   experience needed.</p>
            </div>
            <div class="course-curriculum__container">
                <h5>Introduction</h5>
                <h5>Variables</h5>
            </div>
            </body></html>
        "#;

        let details = extract_course(html);
        assert_eq!(details.title, "Getting Started with Python");
        assert_eq!(
            details.description,
            "Learn the basics. No prior experience needed."
        );
        assert_eq!(details.curriculum, vec!["Introduction", "Variables"]);
    }

    #[test]
    fn test_missing_heading_is_not_available() {
        let html = r#"<html><body><h1>Wrong class</h1><h2 class="section__heading">Not h1</h2></body></html>"#;
        assert_eq!(extract_course(html).title, NOT_AVAILABLE);
    }

    #[test]
    fn test_missing_description_is_not_available() {
        let html = r#"<html><body><h1 class="section__heading">T</h1></body></html>"#;
        assert_eq!(extract_course(html).description, NOT_AVAILABLE);
    }

    #[test]
    fn test_missing_curriculum_section() {
        let details = extract_course("<html><body></body></html>");
        assert_eq!(details.curriculum, vec![NO_CURRICULUM.to_string()]);
    }

    #[test]
    fn test_empty_curriculum_section() {
        let html = r#"<div class="course-curriculum__container"><p>Soon</p></div>"#;
        assert!(extract_course(html).curriculum.is_empty());
    }

    #[test]
    fn test_heading_with_multiple_classes() {
        let html = r#"<h1 class="section__heading section__heading--large">Big</h1>"#;
        assert_eq!(extract_course(html).title, "Big");
    }

    #[test]
    fn test_first_heading_wins() {
        let html = r#"
            <h1 class="section__heading">First</h1>
            <h1 class="section__heading">Second</h1>
        "#;
        assert_eq!(extract_course(html).title, "First");
    }

    #[test]
    fn test_curriculum_up_to_limit_kept_whole() {
        for n in [1, 5, 9, 10] {
            let details = extract_course(&page_with_curriculum(n));
            assert_eq!(details.curriculum.len(), n);
            assert_eq!(details.curriculum[n - 1], format!("Chapter {}", n));
        }
    }

    #[test]
    fn test_curriculum_over_limit_truncated() {
        for n in [11, 12, 40] {
            let details = extract_course(&page_with_curriculum(n));
            assert_eq!(details.curriculum.len(), CURRICULUM_LIMIT + 1);
            assert_eq!(details.curriculum[9], "Chapter 10");
            assert_eq!(details.curriculum[10], CURRICULUM_OVERFLOW);
        }
    }

    #[test]
    fn test_curriculum_items_outside_container_ignored() {
        let html = r#"
            <h5>Sidebar</h5>
            <div class="course-curriculum__container"><h5>Inside</h5></div>
            <h5>Footer</h5>
        "#;
        assert_eq!(extract_course(html).curriculum, vec!["Inside"]);
    }
}
