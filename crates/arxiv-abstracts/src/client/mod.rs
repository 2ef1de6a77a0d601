//! arXiv query API client.
//!
//! Provides an async HTTP client with:
//! - A fixed politeness delay before every request
//! - Status-code classification into retryable and fatal errors
//! - Atom feed parsing into paper records
//! - Lazy per-category pagination with per-page retries (see [`ArxivClient::retrieve`])

mod atom;
mod retriever;

use reqwest::Client;

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};

pub use atom::{FeedPage, parse_feed};
pub use retriever::PaperSource;

/// arXiv API client.
#[derive(Clone)]
pub struct ArxivClient {
    /// HTTP client.
    client: Client,

    /// Retrieval settings.
    config: Config,
}

impl ArxivClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(api::USER_AGENT)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .build()?;

        Ok(Self { client, config })
    }

    /// Fetch one page of a category listing, newest submissions first.
    ///
    /// Sleeps for the configured page delay before issuing the request.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-success status or an unparseable feed.
    pub async fn fetch_page(
        &self,
        category: &str,
        start: usize,
        max_results: usize,
    ) -> ClientResult<FeedPage> {
        // Rate limit
        tokio::time::sleep(self.config.page_delay).await;

        let params = [
            ("search_query", format!("cat:{category}")),
            ("start", start.to_string()),
            ("max_results", max_results.to_string()),
            ("sortBy", "submittedDate".to_string()),
            ("sortOrder", "descending".to_string()),
        ];

        tracing::debug!(category, start, max_results, "Requesting page");

        let response = self
            .client
            .get(&self.config.query_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let response = self.handle_response(response).await?;
        let body = response.text().await.map_err(|e| self.classify(e))?;

        parse_feed(&body)
    }

    /// Map transport timeouts onto [`ClientError::Timeout`].
    fn classify(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout(self.config.request_timeout)
        } else {
            ClientError::Http(err)
        }
    }

    /// Handle API response status codes.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);

                Err(ClientError::rate_limited(retry_after))
            }
            404 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::not_found(text))
            }
            400 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::bad_request(text))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
            }
        }
    }
}

impl std::fmt::Debug for ArxivClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArxivClient")
            .field("query_url", &self.config.query_url)
            .field("page_size", &self.config.page_size)
            .finish()
    }
}
