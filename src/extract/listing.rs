//! Catalog listing page parsing

use scraper::{Html, Selector};

const LIST_ITEM_SELECTOR: &str = "li.products__list-item";
const COURSE_CARD_SELECTOR: &str = "a.course-card";

/// Returns the course link of every product entry on a listing page
///
/// Entries are returned in document order. An entry without a course card
/// anchor, or whose anchor has no `href`, is skipped without a placeholder.
/// The hrefs are returned exactly as written in the markup (usually
/// site-relative paths such as `/courses/intro-to-ai`).
pub fn course_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    let (Ok(item_selector), Ok(card_selector)) = (
        Selector::parse(LIST_ITEM_SELECTOR),
        Selector::parse(COURSE_CARD_SELECTOR),
    ) else {
        return links;
    };

    for item in document.select(&item_selector) {
        let href = item
            .select(&card_selector)
            .next()
            .and_then(|card| card.value().attr("href"));

        match href {
            Some(href) => links.push(href.to_string()),
            None => tracing::trace!("Listing entry without a course card link, skipping"),
        }
    }

    links
}
