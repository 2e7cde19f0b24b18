//! Whale Flow Signals
//!
//! Polls a whale transaction feed for a fixed window, classifies each
//! transaction as a supply change or an exchange flow, aggregates the USD
//! amounts per asset and renders bull/bear signals.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod database;
pub mod errors;
pub mod feed;
pub mod notify;
pub mod pipeline;
pub mod processor;
pub mod types;
pub mod utils;
