//! Web scraping module for content extraction.
//!
//! Uses reqwest for fetching and scraper for HTML parsing.

use lazy_static::lazy_static;
use reqwest::{Client, StatusCode};
use scraper::{ElementRef, Html, Node, Selector};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Elements whose text never counts as page content
const EXCLUDED_ELEMENTS: &[&str] = &["script", "style", "noscript", "header", "footer", "nav"];

lazy_static! {
    static ref PARAGRAPH_SELECTOR: Selector = Selector::parse("p").unwrap();
    static ref TITLE_SELECTOR: Selector = Selector::parse("title").unwrap();
    static ref H1_SELECTOR: Selector = Selector::parse("h1").unwrap();
}

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),
    #[error("request timed out after {0} seconds")]
    Timeout(u64),
    #[error("server responded with HTTP {0}")]
    HttpStatus(StatusCode),
}

/// Outcome of a single page fetch. Failures are values, never panics or errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    Success { html: String },
    Failure { reason: String },
}

/// Performs one GET per call with a fixed user agent and timeout
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    timeout: Duration,
}

impl PageFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client, timeout })
    }

    /// Fetch the raw HTML of `url`. Single attempt, no retries.
    pub async fn fetch(&self, url: &str) -> FetchResult {
        match self.try_fetch(url).await {
            Ok(html) => {
                debug!(url, bytes = html.len(), "page fetched");
                FetchResult::Success { html }
            }
            Err(e) => {
                warn!(url, error = %e, "page fetch failed");
                FetchResult::Failure {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::HttpStatus(status));
        }

        response.text().await.map_err(|e| self.classify(e))
    }

    fn classify(&self, error: reqwest::Error) -> ScraperError {
        if error.is_timeout() {
            ScraperError::Timeout(self.timeout.as_secs())
        } else {
            ScraperError::FetchError(error)
        }
    }
}

/// Extract the page title from <title> or <h1>
pub fn extract_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    [&*TITLE_SELECTOR, &*H1_SELECTOR]
        .into_iter()
        .filter_map(|selector| document.select(selector).next())
        .map(|element| element.text().collect::<String>().trim().to_string())
        .find(|title| !title.is_empty())
}

/// Extract the readable paragraph text of a page.
///
/// Text inside script, style, noscript, header, footer and nav elements is
/// dropped, the remaining `<p>` elements are joined in document order and all
/// whitespace runs collapse to a single space. A page without paragraphs
/// yields an empty string.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let paragraphs: Vec<String> = document
        .select(&PARAGRAPH_SELECTOR)
        .filter(|paragraph| !paragraph.ancestors().any(|node| is_excluded(node.value())))
        .map(paragraph_text)
        .collect();

    collapse_whitespace(&paragraphs.join(" "))
}

/// Text of a paragraph, skipping any excluded elements nested inside it
fn paragraph_text(paragraph: ElementRef) -> String {
    paragraph
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let excluded = node
                .ancestors()
                .take_while(|ancestor| ancestor.id() != paragraph.id())
                .any(|ancestor| is_excluded(ancestor.value()));
            (!excluded).then_some(&**text)
        })
        .collect()
}

fn is_excluded(node: &Node) -> bool {
    node.as_element()
        .is_some_and(|element| EXCLUDED_ELEMENTS.contains(&element.name()))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
