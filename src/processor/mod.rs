//! Classifier and aggregator
//!
//! The classifier maps each transaction to its economic effect; the
//! aggregator folds those effects into per-asset supply and exchange-flow
//! totals in a single pass.

pub mod aggregator;
pub mod classifier;

pub use aggregator::{summarize, Aggregator};
pub use classifier::{classify, classify_transfer, Classification, IgnoreReason};
