//! Listing page scraping
//!
//! Turns one catalog listing page into course records by fetching and
//! extracting every linked detail page.

use crate::config::{CrawlerConfig, DetailFailurePolicy};
use crate::course::CourseRecord;
use crate::crawler::{FetchError, PageFetcher};
use crate::extract::{course_links, extract_course};
use futures::stream::{self, StreamExt};

/// Settings for scraping a single listing page
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    /// Prepended verbatim to each relative course link
    pub site_origin: String,

    /// Maximum number of detail pages in flight at once
    pub detail_concurrency: usize,

    pub on_detail_error: DetailFailurePolicy,
}

impl ScrapeOptions {
    /// Sequential scraping that aborts on the first failed detail page
    pub fn new(site_origin: impl Into<String>) -> Self {
        Self {
            site_origin: site_origin.into(),
            detail_concurrency: 1,
            on_detail_error: DetailFailurePolicy::Abort,
        }
    }

    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self {
            site_origin: config.site_origin.clone(),
            detail_concurrency: config.detail_concurrency,
            on_detail_error: config.on_detail_error,
        }
    }
}

/// Result of scraping one listing page
#[derive(Debug, Default)]
pub struct PageScrape {
    /// Extracted courses, in listing order
    pub records: Vec<CourseRecord>,

    /// Course links found on the listing, including skipped ones
    pub link_count: usize,
}

impl PageScrape {
    /// True when the listing had no course links at all
    pub fn is_empty_listing(&self) -> bool {
        self.link_count == 0
    }
}

/// Builds a detail page URL from the site origin and a listing href
pub fn course_url(site_origin: &str, href: &str) -> String {
    format!("{}{}", site_origin, href)
}

/// Scrapes every course linked from a listing page
///
/// # Flow
///
/// 1. Collect course links from the listing markup (entries without a
///    course card are skipped)
/// 2. Fetch each detail page through `fetcher`
/// 3. Extract details and attach the detail page URL
///
/// Records come back in listing order, even when `detail_concurrency`
/// allows several fetches in flight.
///
/// # Errors
///
/// With [`DetailFailurePolicy::Abort`] the first failed detail fetch, in
/// listing order, is returned and no further detail fetches are started.
/// With `detail_concurrency` n > 1, up to n - 1 requests already in flight
/// may still complete; their results are discarded. With
/// [`DetailFailurePolicy::Skip`] failures are logged and the course is left
/// out, but it still counts toward [`PageScrape::link_count`].
pub async fn scrape_page<F>(
    listing_html: &str,
    fetcher: &F,
    options: &ScrapeOptions,
) -> Result<PageScrape, FetchError>
where
    F: PageFetcher + ?Sized,
{
    let urls: Vec<String> = course_links(listing_html)
        .iter()
        .map(|href| course_url(&options.site_origin, href))
        .collect();

    let link_count = urls.len();
    tracing::debug!("Found {} course links on listing page", link_count);

    let mut fetched = stream::iter(urls)
        .map(move |url| async move {
            let result = fetcher.fetch(&url).await;
            (url, result)
        })
        .buffered(options.detail_concurrency.max(1));

    let mut records = Vec::new();
    while let Some((url, result)) = fetched.next().await {
        match result {
            Ok(html) => {
                let record = extract_course(&html).into_record(url);
                tracing::debug!("Extracted course: {}", record.title);
                records.push(record);
            }
            Err(e) => match options.on_detail_error {
                DetailFailurePolicy::Abort => return Err(e),
                DetailFailurePolicy::Skip => {
                    tracing::warn!("Skipping course {}: {}", url, e);
                }
            },
        }
    }

    Ok(PageScrape {
        records,
        link_count,
    })
}
