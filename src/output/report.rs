//! Console reports for a finished crawl

use crate::course::CourseRecord;
use crate::crawler::{CrawlOutcome, Termination};

const RULE_WIDTH: usize = 50;

/// Formats every course as a numbered block
///
/// Each block lists the title, description and comma-separated curriculum,
/// followed by a dashed rule.
pub fn format_course_report(records: &[CourseRecord]) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    let mut out = String::new();

    for (idx, course) in records.iter().enumerate() {
        out.push_str(&format!("Course {}:\n", idx + 1));
        out.push_str(&format!("Title: {}\n", course.title));
        out.push_str(&format!("Description: {}\n", course.description));
        out.push_str(&format!("Curriculum: {}\n", course.curriculum.join(", ")));
        out.push_str(&rule);
        out.push('\n');
    }

    out
}

/// One-paragraph summary of how the crawl went
pub fn format_crawl_summary(outcome: &CrawlOutcome) -> String {
    let ending = match &outcome.termination {
        Termination::Exhausted { empty_page } => {
            format!("Catalog exhausted at empty page {}", empty_page)
        }
        Termination::Aborted { page, error } => {
            format!("Crawl aborted on page {}: {}", page, error)
        }
    };

    format!(
        "=== Crawl Summary ===\n  Courses: {}\n  Listing pages requested: {}\n  {}\n",
        outcome.records.len(),
        outcome.pages_requested,
        ending
    )
}
