//! Page transport for the transaction feed
//!
//! [`PageSource`] is the seam between the pagination loop and the network.
//! [`HttpPageSource`] issues real GET requests; tests substitute an
//! in-memory source.

use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::debug;

use crate::errors::{FeedError, FeedResult};
use crate::feed::types::{FeedResponse, PageQuery};

/// Something that can answer a single page request
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch one page. A non-success `result` is not an error at this level.
    async fn fetch_page(&self, query: &PageQuery) -> FeedResult<FeedResponse>;

    /// Human-readable location of the request, without secrets
    fn describe(&self, query: &PageQuery) -> String {
        query.redacted()
    }
}

/// Feed transport over HTTP
pub struct HttpPageSource {
    client: Client,
    endpoint: Url,
}

impl HttpPageSource {
    /// Build a transport with a bounded per-request timeout
    pub fn new(endpoint: &str, timeout_seconds: u64) -> FeedResult<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| FeedError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| FeedError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_page(&self, query: &PageQuery) -> FeedResult<FeedResponse> {
        debug!("GET {}", self.describe(query));

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&query.params())
            .send()
            .await?;

        // Failure is signalled by the `result` field, so the status is only logged
        let status = response.status();
        let body = response.text().await?;
        debug!("Feed answered {} ({} bytes)", status, body.len());

        let page: FeedResponse = serde_json::from_str(&body)?;
        Ok(page)
    }

    fn describe(&self, query: &PageQuery) -> String {
        format!("{}?{}", self.endpoint, query.redacted())
    }
}
