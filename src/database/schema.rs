//! Reputation database schema
//!
//! One row per `(blockchain, address)`; later sightings overwrite the owner
//! label and category.

use crate::errors::AppResult;
use rusqlite::Connection;
use tracing::debug;

pub const SCHEMA_VERSION: i32 = 1;

pub fn setup_schema(connection: &Connection) -> AppResult<()> {
    connection.execute_batch(
        r#"
        PRAGMA user_version = 1;

        CREATE TABLE IF NOT EXISTS whales (
            blockchain TEXT NOT NULL,
            address TEXT NOT NULL,
            owner TEXT,                       -- NULL when the feed has no label
            owner_type TEXT NOT NULL,
            first_seen INTEGER DEFAULT (strftime('%s', 'now')),
            last_seen INTEGER DEFAULT (strftime('%s', 'now')),
            CONSTRAINT ux_blockchain_address UNIQUE (blockchain, address)
        );

        CREATE INDEX IF NOT EXISTS idx_whales_owner_type ON whales(owner_type);
        "#,
    )?;

    debug!("Reputation schema ready (version {})", SCHEMA_VERSION);
    Ok(())
}
