//! Job posting extraction: fetch a URL and reduce the HTML to plain text.

use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use thiserror::Error;
use tracing::debug;

static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("job page returned status {0}")]
    Status(u16),

    #[error("job page contained no extractable text")]
    Empty,
}

/// Retrieves the raw HTML behind a job posting URL.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Production fetcher backed by reqwest, with a bounded request timeout.
#[derive(Clone)]
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tailor/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let body = response.text().await?;
        debug!("Fetched {} bytes from {url}", body.len());
        Ok(body)
    }
}

/// Fetches `url` and extracts the job description text.
///
/// A page that parses but yields only whitespace is reported as
/// `FetchError::Empty`, the same failure class as an unreachable page.
pub async fn extract_job_description(
    fetcher: &dyn PageFetcher,
    url: &str,
) -> Result<String, FetchError> {
    let html = fetcher.fetch(url).await?;
    let text = job_text_from_html(&html);
    if text.trim().is_empty() {
        return Err(FetchError::Empty);
    }
    Ok(text)
}

/// Joins the text of every `<p>` element in document order, one per line.
/// Falls back to all text in the page when no paragraph carries any.
pub fn job_text_from_html(html: &str) -> String {
    let document = Html::parse_document(html);

    let text = document
        .select(&PARAGRAPH)
        .map(|p| p.text().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n");

    if !text.trim().is_empty() {
        return text;
    }

    document.root_element().text().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticPage(Result<&'static str, u16>);

    #[async_trait]
    impl PageFetcher for StaticPage {
        async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
            self.0.map(str::to_string).map_err(FetchError::Status)
        }
    }

    #[test]
    fn test_paragraphs_joined_in_document_order() {
        let html = "<html><body><p>First</p><div><p>Second <b>bold</b></p></div></body></html>";
        assert_eq!(job_text_from_html(html), "First\nSecond bold");
    }

    #[test]
    fn test_falls_back_to_page_text_without_paragraphs() {
        let html = "<html><body><h1>Rust Engineer</h1><ul><li>Tokio</li></ul></body></html>";
        let text = job_text_from_html(html);
        assert!(text.contains("Rust Engineer"));
        assert!(text.contains("Tokio"));
    }

    #[test]
    fn test_blank_paragraphs_trigger_fallback() {
        let html = "<html><body><p>  </p><span>Apply now</span></body></html>";
        assert!(job_text_from_html(html).contains("Apply now"));
    }

    #[tokio::test]
    async fn test_extract_returns_paragraph_text() {
        let fetcher = StaticPage(Ok("<p>Need Python and SQL</p>"));
        let text = extract_job_description(&fetcher, "https://jobs.example").await.unwrap();
        assert_eq!(text, "Need Python and SQL");
    }

    #[tokio::test]
    async fn test_non_success_status_is_fetch_error() {
        let fetcher = StaticPage(Err(404));
        let err = extract_job_description(&fetcher, "https://jobs.example").await.unwrap_err();
        assert!(matches!(err, FetchError::Status(404)));
    }

    #[tokio::test]
    async fn test_empty_page_is_fetch_error() {
        let fetcher = StaticPage(Ok("<html><body>   </body></html>"));
        let err = extract_job_description(&fetcher, "https://jobs.example").await.unwrap_err();
        assert!(matches!(err, FetchError::Empty));
    }
}
