//! Wallet reputation persistence
//!
//! Optional, best-effort sink that upserts observed wallet metadata into
//! SQLite. Nothing in the signal pipeline reads it back.
//!
//! - `connection` - connection wrapper and transaction helper
//! - `schema` - `whales` table setup
//! - `reputation` - upsert and lookup operations

pub mod connection;
pub mod reputation;
pub mod schema;

pub use connection::DatabaseConnection;
pub use reputation::{record_best_effort, ReputationStore, WalletRecord};
pub use schema::setup_schema;
