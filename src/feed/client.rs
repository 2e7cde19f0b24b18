use tracing::{debug, info, warn};

use crate::config::WhaleAlertConfig;
use crate::errors::{FeedError, FeedResult};
use crate::feed::transport::{HttpPageSource, PageSource};
use crate::feed::types::{FeedResponse, PageQuery, TimeWindow};
use crate::types::Transaction;

/// Request settings shared by every page of a fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSettings {
    pub api_key: String,
    pub min_value: String,
    pub limit: usize,
}

impl From<&WhaleAlertConfig> for FeedSettings {
    fn from(config: &WhaleAlertConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            min_value: config.min.clone(),
            limit: config.limit,
        }
    }
}

/// Everything gathered by one fetch
///
/// `error` is set when the loop stopped early; `transactions` still holds
/// every page that succeeded before that.
#[derive(Debug, Default)]
pub struct FeedOutcome {
    pub transactions: Vec<Transaction>,
    pub error: Option<FeedError>,
    /// Location of the last request issued, without the API key
    pub location_hint: Option<String>,
    pub requests: usize,
    pub pages: usize,
}

impl FeedOutcome {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Paginated feed client with a single retry per page
pub struct FeedClient<S: PageSource> {
    source: S,
    settings: FeedSettings,
}

impl FeedClient<HttpPageSource> {
    /// HTTP client for the configured endpoint
    pub fn from_config(config: &WhaleAlertConfig) -> FeedResult<Self> {
        let source = HttpPageSource::new(&config.endpoint, config.timeout_seconds)?;
        Ok(Self::new(source, FeedSettings::from(config)))
    }
}

impl<S: PageSource> FeedClient<S> {
    pub fn new(source: S, settings: FeedSettings) -> Self {
        Self { source, settings }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch every page of `window`
    ///
    /// Keeps requesting while a page reports at least `limit` items, passing
    /// the server's cursor along. Each page gets one fresh retry.
    pub async fn fetch(&self, window: TimeWindow) -> FeedOutcome {
        let mut outcome = FeedOutcome::default();
        let mut cursor: Option<String> = None;

        loop {
            let query = self.query(window, cursor.take());
            outcome.location_hint = Some(self.source.describe(&query));

            let page = match self.fetch_page_with_retry(&query, &mut outcome.requests).await {
                Ok(page) => page,
                Err(e) => {
                    warn!(
                        "Feed stopped after {} page(s), keeping {} transaction(s): {}",
                        outcome.pages,
                        outcome.transactions.len(),
                        e
                    );
                    outcome.error = Some(e);
                    break;
                }
            };

            outcome.pages += 1;
            let count = page.count;
            debug!(
                "Page {}: count={} items={} cursor={:?}",
                outcome.pages,
                count,
                page.transactions.len(),
                page.cursor
            );
            outcome.transactions.extend(page.transactions);

            if count < self.settings.limit {
                break;
            }
            if page.cursor.is_empty() {
                warn!("Full page without a cursor, stopping pagination");
                break;
            }
            cursor = Some(page.cursor);
        }

        info!(
            "Fetched {} transaction(s) in {} page(s) ({} request(s)) for {}..={}",
            outcome.transactions.len(),
            outcome.pages,
            outcome.requests,
            window.start,
            window.end
        );
        outcome
    }

    async fn fetch_page_with_retry(
        &self,
        query: &PageQuery,
        requests: &mut usize,
    ) -> FeedResult<FeedResponse> {
        *requests += 1;
        match self.fetch_page_once(query).await {
            Ok(page) => Ok(page),
            Err(e @ FeedError::Decode(_)) => Err(e),
            Err(first) => {
                warn!("Feed request failed, retrying once: {}", first);
                *requests += 1;
                self.fetch_page_once(query).await
            }
        }
    }

    async fn fetch_page_once(&self, query: &PageQuery) -> FeedResult<FeedResponse> {
        let page = self.source.fetch_page(query).await?;
        if page.is_success() {
            Ok(page)
        } else if page.message.is_empty() {
            Err(FeedError::Upstream {
                message: format!("upstream returned result {:?} with no message", page.result),
            })
        } else {
            Err(FeedError::Upstream {
                message: page.message,
            })
        }
    }

    fn query(&self, window: TimeWindow, cursor: Option<String>) -> PageQuery {
        PageQuery {
            api_key: self.settings.api_key.clone(),
            min_value: self.settings.min_value.clone(),
            window,
            limit: self.settings.limit,
            cursor,
        }
    }
}
