//! Whale flow data model
//!
//! - `transaction`: feed transactions, wallets, owner categories and kind tags
//! - `summary`: per-asset aggregate maps, the symbol remap table, the
//!   stablecoin set and the classifier pass output

mod summary;
mod transaction;

pub use summary::*;
pub use transaction::*;
