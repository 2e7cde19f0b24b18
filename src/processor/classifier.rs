//! Transaction classification rules
//!
//! Rules are evaluated in order and the first match wins:
//!
//! 1. `mint` - supply increase
//! 2. `burn` - supply decrease
//! 3. anything other than `transfer` - unhandled
//! 4. transfer between equal owner categories - ignored as internal
//! 5. transfer out of an exchange - exchange outflow
//! 6. transfer into an exchange - exchange inflow
//! 7. any other transfer - ignored as peer-to-peer

use std::fmt;

use crate::types::{OwnerCategory, Transaction, TransactionKind};

/// Why a transfer does not touch any aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Origin and destination share an owner category
    Internal,
    /// Categories differ and neither side is an exchange
    PeerToPeer,
}

/// Economic effect of a single transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Mint,
    Burn,
    ExchangeInflow,
    ExchangeOutflow,
    Ignored(IgnoreReason),
    /// Kind tag the rules do not know
    Unhandled,
}

impl Classification {
    pub fn label(&self) -> &'static str {
        match self {
            Classification::Mint => "mint",
            Classification::Burn => "burn",
            Classification::ExchangeInflow => "exchange inflow",
            Classification::ExchangeOutflow => "exchange outflow",
            Classification::Ignored(IgnoreReason::Internal) => "internal transfer",
            Classification::Ignored(IgnoreReason::PeerToPeer) => "peer-to-peer transfer",
            Classification::Unhandled => "unhandled",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a transaction by kind tag and owner categories
pub fn classify(transaction: &Transaction) -> Classification {
    match transaction.kind() {
        TransactionKind::Mint => Classification::Mint,
        TransactionKind::Burn => Classification::Burn,
        TransactionKind::Other(_) => Classification::Unhandled,
        TransactionKind::Transfer => {
            classify_transfer(&transaction.from.category(), &transaction.to.category())
        }
    }
}

/// Classify a transfer from its (origin, destination) category pair
pub fn classify_transfer(from: &OwnerCategory, to: &OwnerCategory) -> Classification {
    if from == to {
        Classification::Ignored(IgnoreReason::Internal)
    } else if from.is_exchange() {
        Classification::ExchangeOutflow
    } else if to.is_exchange() {
        Classification::ExchangeInflow
    } else {
        Classification::Ignored(IgnoreReason::PeerToPeer)
    }
}

/// Diagnostic line for an unhandled transaction
///
/// Format: `  kind:  fromCategory (fromOwner) -> toCategory (toOwner)`
pub fn describe_unhandled(transaction: &Transaction) -> String {
    format!(
        "  {}:  {} ({}) -> {} ({})",
        transaction.kind,
        transaction.from.owner_type,
        transaction.from.owner,
        transaction.to.owner_type,
        transaction.to.owner
    )
}
