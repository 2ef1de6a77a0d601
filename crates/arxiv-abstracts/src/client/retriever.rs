//! Per-category retrieval: lazy pagination with per-page retries.

use futures::stream::{LocalBoxStream, StreamExt};

use super::{ArxivClient, FeedPage};
use crate::error::{ClientError, ClientResult};
use crate::models::PaperRecord;

/// Anything that can list every paper filed under a category.
///
/// The corpus builder depends on this seam rather than on the HTTP client, so
/// traversal logic can be exercised against in-memory sources.
pub trait PaperSource {
    /// Lazily produce every record of `category`, newest submission first.
    ///
    /// The stream ends after the first error.
    fn retrieve<'a>(&'a self, category: &'a str) -> LocalBoxStream<'a, ClientResult<PaperRecord>>;
}

impl PaperSource for ArxivClient {
    fn retrieve<'a>(&'a self, category: &'a str) -> LocalBoxStream<'a, ClientResult<PaperRecord>> {
        ArxivClient::retrieve(self, category).boxed_local()
    }
}

impl ArxivClient {
    /// Stream every record filed under `category`.
    ///
    /// Pages are requested strictly one after another and only when the caller
    /// has drained the previous one. Stops at the reported total or the
    /// configured result cap, whichever comes first.
    pub fn retrieve<'a>(
        &'a self,
        category: &'a str,
    ) -> impl futures::Stream<Item = ClientResult<PaperRecord>> + 'a {
        async_stream::stream! {
            let cap = self.config.max_results;
            let mut offset = 0usize;

            while offset < cap {
                let limit = self.config.page_size.min(cap - offset);

                let page = match self.fetch_page_with_retry(category, offset, limit).await {
                    Ok(page) => page,
                    Err(err) => {
                        yield Err(err);
                        return;
                    }
                };

                let received = page.records.len();
                for record in page.records.into_iter().take(limit) {
                    yield Ok(record);
                }
                offset += received.min(limit);

                let exhausted = match page.total_results {
                    Some(total) => offset >= total,
                    None => received < limit,
                };
                if exhausted || received == 0 {
                    break;
                }
            }

            tracing::debug!(category, retrieved = offset, "Category exhausted");
        }
    }

    /// Fetch one page, retrying transient failures with the fixed page delay.
    ///
    /// An empty page before the advertised total is reached counts as transient.
    async fn fetch_page_with_retry(
        &self,
        category: &str,
        offset: usize,
        limit: usize,
    ) -> ClientResult<FeedPage> {
        let mut attempt = 0u32;

        loop {
            let result = self.fetch_page(category, offset, limit).await.and_then(|page| {
                match page.total_results {
                    Some(total) if page.records.is_empty() && offset < total => {
                        Err(ClientError::EmptyPage { offset, expected: total })
                    }
                    _ => Ok(page),
                }
            });

            match result {
                Ok(page) => return Ok(page),
                Err(err) if err.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        category,
                        offset,
                        attempt,
                        max_retries = self.config.max_retries,
                        error = %err,
                        "Page request failed, retrying"
                    );
                    if let Some(wait) = err.retry_after() {
                        tokio::time::sleep(wait).await;
                    }
                }
                Err(err) if err.is_retryable() => {
                    return Err(ClientError::RetriesExhausted {
                        category: category.to_string(),
                        offset,
                        attempts: attempt + 1,
                        source: Box::new(err),
                    });
                }
                Err(err) => return Err(err),
            }
        }
    }
}
