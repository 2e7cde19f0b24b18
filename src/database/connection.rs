//! Database connection management

use crate::errors::AppResult;
use rusqlite::Connection;
use std::path::Path;
use tracing::info;

/// Core database connection wrapper with shared functionality
pub struct DatabaseConnection {
    connection: Connection,
}

impl DatabaseConnection {
    /// Open (or create) a database file
    pub fn new(database_path: &Path) -> AppResult<Self> {
        let connection = Connection::open(database_path)?;

        info!("Database connection established: {}", database_path.display());
        Ok(Self { connection })
    }

    /// Private in-memory database
    pub fn in_memory() -> AppResult<Self> {
        Ok(Self {
            connection: Connection::open_in_memory()?,
        })
    }

    /// Get a reference to the underlying connection
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Execute a function within a database transaction
    pub fn execute_transaction<F, R>(&mut self, f: F) -> AppResult<R>
    where
        F: FnOnce(&rusqlite::Transaction) -> AppResult<R>,
    {
        let tx = self.connection.transaction()?;

        let result = f(&tx)?;

        tx.commit()?;

        Ok(result)
    }
}
