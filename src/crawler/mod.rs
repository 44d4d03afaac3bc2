//! Crawler module for catalog fetching and course extraction
//!
//! This module contains the crawl pipeline, including:
//! - HTTP fetching behind the [`PageFetcher`] trait
//! - Listing page scraping with per-course detail fetches
//! - Sequential pagination with a fixed inter-page delay

mod fetcher;
mod page;
mod paginator;

#[cfg(test)]
pub(crate) mod fake;

pub use fetcher::{build_http_client, user_agent_string, FetchError, HttpFetcher, PageFetcher};
pub use page::{course_url, scrape_page, PageScrape, ScrapeOptions};
pub use paginator::{CrawlOutcome, Paginator, Termination, DEFAULT_PAGE_DELAY};

use crate::config::Config;
use crate::ScoutError;

/// Runs a complete catalog crawl
///
/// This is the main entry point for crawling. It will:
/// 1. Build the HTTP client from the user agent config
/// 2. Walk listing pages from page 1 until a page with no course links or a failure
/// 3. Fetch and extract every linked course
///
/// Fetch failures during the crawl do not surface as `Err`; they end the
/// crawl and are reported through [`CrawlOutcome::termination`].
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - Courses gathered and how the crawl ended
/// * `Err(ScoutError)` - The HTTP client could not be built
///
/// # Example
///
/// ```no_run
/// use course_scout::config::load_config;
/// use course_scout::crawler::crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("course-scout.toml"))?;
/// let outcome = crawl(&config).await?;
/// println!("{} courses", outcome.records.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: &Config) -> Result<CrawlOutcome, ScoutError> {
    let fetcher = HttpFetcher::new(&config.user_agent)?;
    Ok(Paginator::from_config(&fetcher, &config.crawler).run().await)
}
