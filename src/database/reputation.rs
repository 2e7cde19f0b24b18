use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::database::connection::DatabaseConnection;
use crate::database::schema::setup_schema;
use crate::errors::AppResult;
use crate::types::{Transaction, Wallet};

const UPSERT_WALLET: &str = r#"
    INSERT INTO whales (blockchain, address, owner, owner_type)
    VALUES (?1, ?2, NULLIF(?3, ''), ?4)
    ON CONFLICT (blockchain, address) DO UPDATE SET
        owner = excluded.owner,
        owner_type = excluded.owner_type,
        last_seen = strftime('%s', 'now')
"#;

/// Stored owner metadata for one address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletRecord {
    pub blockchain: String,
    pub address: String,
    pub owner: Option<String>,
    pub owner_type: String,
}

impl WalletRecord {
    pub fn from_wallet(blockchain: &str, wallet: &Wallet) -> Self {
        Self {
            blockchain: blockchain.to_string(),
            address: wallet.address.clone(),
            owner: wallet.owner_label().map(str::to_string),
            owner_type: wallet.owner_type.clone(),
        }
    }
}

/// Address reputation sink keyed by `(blockchain, address)`
pub struct ReputationStore {
    db: DatabaseConnection,
}

impl ReputationStore {
    pub fn open(path: &Path) -> AppResult<Self> {
        let db = DatabaseConnection::new(path)?;
        setup_schema(db.connection())?;
        Ok(Self { db })
    }

    pub fn in_memory() -> AppResult<Self> {
        let db = DatabaseConnection::in_memory()?;
        setup_schema(db.connection())?;
        Ok(Self { db })
    }

    pub fn connection(&self) -> &Connection {
        self.db.connection()
    }

    pub fn upsert(&self, record: &WalletRecord) -> AppResult<()> {
        upsert_wallet(self.db.connection(), record)
    }

    /// Upsert the origin and destination wallet of every transaction
    ///
    /// Individual row failures are logged and skipped. Wallets without an
    /// address are not stored. Returns the number of rows written.
    pub fn record_transactions(&mut self, transactions: &[Transaction]) -> AppResult<usize> {
        self.db.execute_transaction(|tx| {
            let mut written = 0usize;
            for transaction in transactions {
                for wallet in transaction.wallets() {
                    if wallet.address.is_empty() {
                        continue;
                    }
                    let record = WalletRecord::from_wallet(&transaction.blockchain, wallet);
                    match upsert_wallet(tx, &record) {
                        Ok(()) => written += 1,
                        Err(e) => debug!(
                            "Skipping wallet {}/{}: {}",
                            record.blockchain, record.address, e
                        ),
                    }
                }
            }
            Ok(written)
        })
    }

    pub fn get(&self, blockchain: &str, address: &str) -> AppResult<Option<WalletRecord>> {
        let record = self
            .db
            .connection()
            .query_row(
                "SELECT blockchain, address, owner, owner_type FROM whales
                 WHERE blockchain = ?1 AND address = ?2",
                params![blockchain, address],
                |row| {
                    Ok(WalletRecord {
                        blockchain: row.get(0)?,
                        address: row.get(1)?,
                        owner: row.get(2)?,
                        owner_type: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(record)
    }

    pub fn count(&self) -> AppResult<usize> {
        let count: i64 = self
            .db
            .connection()
            .query_row("SELECT COUNT(*) FROM whales", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn upsert_wallet(conn: &Connection, record: &WalletRecord) -> AppResult<()> {
    conn.execute(
        UPSERT_WALLET,
        params![
            record.blockchain,
            record.address,
            record.owner.as_deref().unwrap_or(""),
            record.owner_type,
        ],
    )?;
    Ok(())
}

/// Best-effort recording: any failure is logged and swallowed
pub fn record_best_effort(path: &Path, transactions: &[Transaction]) -> usize {
    let result = ReputationStore::open(path)
        .and_then(|mut store| store.record_transactions(transactions));
    match result {
        Ok(written) => {
            info!("Recorded {} wallet(s) in {}", written, path.display());
            written
        }
        Err(e) => {
            warn!("Wallet recording to {} failed: {}", path.display(), e);
            0
        }
    }
}
