//! Canned-response fetcher for crawler unit tests

use crate::crawler::{FetchError, PageFetcher};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves fixed markup per URL and records every request
///
/// URLs without a registered page answer with HTTP 404.
#[derive(Default)]
pub(crate) struct StaticFetcher {
    pages: HashMap<String, Result<String, u16>>,
    requests: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), Ok(html.to_string()));
        self
    }

    pub(crate) fn with_failure(mut self, url: &str, status: u16) -> Self {
        self.pages.insert(url.to_string(), Err(status));
        self
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn request_count(&self, prefix: &str) -> usize {
        self.requests()
            .iter()
            .filter(|url| url.starts_with(prefix))
            .count()
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.pages.get(url) {
            Some(Ok(html)) => Ok(html.clone()),
            Some(Err(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

/// Listing page markup with one product entry per href
pub(crate) fn listing_html(hrefs: &[&str]) -> String {
    let items: String = hrefs
        .iter()
        .map(|href| {
            format!(
                r#"<li class="products__list-item"><a class="course-card" href="{}">Course</a></li>"#,
                href
            )
        })
        .collect();
    format!("<html><body><ul>{}</ul></body></html>", items)
}

/// Detail page markup with a title and the given curriculum headings
pub(crate) fn detail_html(title: &str, curriculum: &[&str]) -> String {
    let items: String = curriculum
        .iter()
        .map(|item| format!("<h5>{}</h5>", item))
        .collect();
    format!(
        r#"<html><body>
        <h1 class="section__heading">{}</h1>
        <div class="rich-text__container"><p>About {}</p></div>
        <div class="course-curriculum__container">{}</div>
        </body></html>"#,
        title, title, items
    )
}
