//! Transaction feed integration
//!
//! - **Client** - pagination loop with a single retry per page
//! - **Transport** - `PageSource` seam and the HTTP implementation
//! - **Types** - wire response, page query and time window

pub mod client;
pub mod transport;
pub mod types;

pub use client::{FeedClient, FeedOutcome, FeedSettings};
pub use transport::{HttpPageSource, PageSource};
pub use types::{FeedResponse, PageQuery, TimeWindow};
