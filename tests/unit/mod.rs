//! Unit tests per component

pub mod aggregation;
pub mod feed_client;
pub mod reputation;
