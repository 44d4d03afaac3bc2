//! Catalog pagination driver
//!
//! Walks listing pages `page=1, 2, ...` until a page lists no course links
//! or a request fails. Either way the courses gathered so far are returned; the
//! [`Termination`] tells the two endings apart.

use crate::config::CrawlerConfig;
use crate::course::CourseRecord;
use crate::crawler::page::{scrape_page, PageScrape, ScrapeOptions};
use crate::crawler::{FetchError, PageFetcher};
use std::time::{Duration, Instant};

/// Default pause between listing pages
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_secs(2);

/// Internal crawl state
#[derive(Debug)]
enum CrawlState {
    /// Next listing page to request
    Running { page: u32 },

    /// `page` listed no course links
    Exhausted { page: u32 },

    /// Fetching `page` or one of its courses failed
    Aborted { page: u32, error: FetchError },
}

/// How a crawl ended
#[derive(Debug)]
pub enum Termination {
    /// A listing page had no course links; the catalog was fully paginated
    Exhausted { empty_page: u32 },

    /// A request failed; courses before the failing page were kept
    Aborted { page: u32, error: FetchError },
}

/// Result of a full crawl run
#[derive(Debug)]
pub struct CrawlOutcome {
    /// Courses in crawl order
    pub records: Vec<CourseRecord>,

    /// Number of listing pages requested, including the final one
    pub pages_requested: u32,

    pub termination: Termination,
}

impl CrawlOutcome {
    /// Returns true if the crawl reached the end of the catalog
    pub fn is_complete(&self) -> bool {
        matches!(self.termination, Termination::Exhausted { .. })
    }

    /// Drops the termination details and returns the courses
    pub fn into_records(self) -> Vec<CourseRecord> {
        self.records
    }
}

/// Sequential listing page crawler
pub struct Paginator<'a, F: PageFetcher + ?Sized> {
    fetcher: &'a F,
    base_url: String,
    page_delay: Duration,
    options: ScrapeOptions,
}

impl<'a, F: PageFetcher + ?Sized> Paginator<'a, F> {
    /// Creates a paginator with the default two second page delay
    pub fn new(fetcher: &'a F, base_url: impl Into<String>, options: ScrapeOptions) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
            page_delay: DEFAULT_PAGE_DELAY,
            options,
        }
    }

    pub fn from_config(fetcher: &'a F, config: &CrawlerConfig) -> Self {
        Self::new(fetcher, &config.base_url, ScrapeOptions::from_config(config))
            .with_page_delay(config.page_delay())
    }

    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    /// URL of listing page `page`
    pub fn page_url(&self, page: u32) -> String {
        let separator = if self.base_url.contains('?') { '&' } else { '?' };
        format!("{}{}page={}", self.base_url, separator, page)
    }

    /// Runs the crawl to completion
    ///
    /// Never fails: a fetch error ends the crawl as
    /// [`Termination::Aborted`] and is logged rather than returned.
    pub async fn run(&self) -> CrawlOutcome {
        let start_time = Instant::now();
        let mut records: Vec<CourseRecord> = Vec::new();
        let mut pages_requested = 0;
        let mut state = CrawlState::Running { page: 1 };

        let termination = loop {
            state = match state {
                CrawlState::Running { page } => {
                    pages_requested += 1;
                    tracing::info!("Scraping page {}...", page);

                    match self.scrape(page).await {
                        Ok(scraped) if scraped.is_empty_listing() => {
                            CrawlState::Exhausted { page }
                        }
                        Ok(scraped) => {
                            if scraped.records.is_empty() {
                                tracing::warn!(
                                    "Page {}: all {} courses skipped",
                                    page,
                                    scraped.link_count
                                );
                            } else {
                                tracing::info!("Page {}: {} courses", page, scraped.records.len());
                            }
                            records.extend(scraped.records);
                            tokio::time::sleep(self.page_delay).await;
                            CrawlState::Running { page: page + 1 }
                        }
                        Err(error) => {
                            tracing::error!("Crawl aborted on page {}: {}", page, error);
                            CrawlState::Aborted { page, error }
                        }
                    }
                }
                CrawlState::Exhausted { page } => {
                    break Termination::Exhausted { empty_page: page };
                }
                CrawlState::Aborted { page, error } => {
                    break Termination::Aborted { page, error };
                }
            };
        };

        tracing::info!(
            "Crawl finished: {} courses from {} pages in {:?}",
            records.len(),
            pages_requested,
            start_time.elapsed()
        );

        CrawlOutcome {
            records,
            pages_requested,
            termination,
        }
    }

    async fn scrape(&self, page: u32) -> Result<PageScrape, FetchError> {
        let listing = self.fetcher.fetch(&self.page_url(page)).await?;
        scrape_page(&listing, self.fetcher, &self.options).await
    }
}
