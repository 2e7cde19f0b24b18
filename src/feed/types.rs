//! Wire types for the transaction feed

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::Transaction;

/// `result` value the feed uses to signal success
pub const RESULT_SUCCESS: &str = "success";

/// One page of the feed response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedResponse {
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub message: String,
    /// Opaque token for requesting the next page
    #[serde(default)]
    pub cursor: String,
    /// Number of items the server reports for this page
    #[serde(default)]
    pub count: usize,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub transactions: Vec<Transaction>,
}

impl FeedResponse {
    pub fn is_success(&self) -> bool {
        self.result == RESULT_SUCCESS
    }

    /// Successful page carrying `transactions`, with `count` set to their number
    pub fn success(cursor: &str, transactions: Vec<Transaction>) -> Self {
        Self {
            result: RESULT_SUCCESS.to_string(),
            message: String::new(),
            cursor: cursor.to_string(),
            count: transactions.len(),
            transactions,
        }
    }

    pub fn failure(message: &str) -> Self {
        Self {
            result: "error".to_string(),
            message: message.to_string(),
            ..Default::default()
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Transaction>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Transaction>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Closed `[start, end]` window in unix seconds, end inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: i64,
    pub end: i64,
}

impl TimeWindow {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }
}

/// Query parameters for a single page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub api_key: String,
    pub min_value: String,
    pub window: TimeWindow,
    pub limit: usize,
    /// Absent on the first page
    pub cursor: Option<String>,
}

impl PageQuery {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("api_key", self.api_key.clone()),
            ("min_value", self.min_value.clone()),
            ("start", self.window.start.to_string()),
            ("end", self.window.end.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(cursor) = &self.cursor {
            params.push(("cursor", cursor.clone()));
        }
        params
    }

    /// Query string with the API key masked, for logs and error reports
    pub fn redacted(&self) -> String {
        self.params()
            .into_iter()
            .map(|(key, value)| {
                if key == "api_key" {
                    format!("{}=***", key)
                } else {
                    format!("{}={}", key, value)
                }
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}
