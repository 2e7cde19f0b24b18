//! Transaction feed data model
//!
//! Mirrors the JSON objects returned by the transaction feed. Everything here
//! is immutable once fetched; classification works on borrowed references.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single transaction as reported by the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub blockchain: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub id: String,
    #[serde(rename = "transaction_type", default)]
    pub kind: String,
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub from: Wallet,
    #[serde(default)]
    pub to: Wallet,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub amount_usd: f64,
    /// Number of batched p2p transfers folded into this record
    #[serde(default)]
    pub transaction_count: u32,
}

impl Transaction {
    /// Parse the free-text kind tag
    pub fn kind(&self) -> TransactionKind {
        TransactionKind::from(self.kind.as_str())
    }

    /// Both wallets touched by this transaction, origin first
    pub fn wallets(&self) -> [&Wallet; 2] {
        [&self.from, &self.to]
    }
}

/// Origin or destination of a transaction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    #[serde(default)]
    pub address: String,
    /// Owner label, empty when the feed does not know it
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub owner_type: String,
}

impl Wallet {
    pub fn category(&self) -> OwnerCategory {
        OwnerCategory::from(self.owner_type.as_str())
    }

    pub fn owner_label(&self) -> Option<&str> {
        if self.owner.is_empty() {
            None
        } else {
            Some(self.owner.as_str())
        }
    }
}

/// Owner category tag attached to a wallet
///
/// The feed sends a free-text string. Known values get their own variant; any
/// other value is kept verbatim so two unknown categories can still be
/// compared for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OwnerCategory {
    Exchange,
    Unknown,
    Other,
    Unclassified(String),
}

impl OwnerCategory {
    pub fn as_str(&self) -> &str {
        match self {
            OwnerCategory::Exchange => "exchange",
            OwnerCategory::Unknown => "unknown",
            OwnerCategory::Other => "other",
            OwnerCategory::Unclassified(tag) => tag.as_str(),
        }
    }

    pub fn is_exchange(&self) -> bool {
        matches!(self, OwnerCategory::Exchange)
    }
}

impl From<&str> for OwnerCategory {
    fn from(tag: &str) -> Self {
        match tag {
            "exchange" => OwnerCategory::Exchange,
            "unknown" => OwnerCategory::Unknown,
            "other" => OwnerCategory::Other,
            other => OwnerCategory::Unclassified(other.to_string()),
        }
    }
}

impl fmt::Display for OwnerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind tag of a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionKind {
    Mint,
    Burn,
    Transfer,
    Other(String),
}

impl From<&str> for TransactionKind {
    fn from(tag: &str) -> Self {
        match tag {
            "mint" => TransactionKind::Mint,
            "burn" => TransactionKind::Burn,
            "transfer" => TransactionKind::Transfer,
            other => TransactionKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Mint => write!(f, "mint"),
            TransactionKind::Burn => write!(f, "burn"),
            TransactionKind::Transfer => write!(f, "transfer"),
            TransactionKind::Other(tag) => write!(f, "{}", tag),
        }
    }
}
