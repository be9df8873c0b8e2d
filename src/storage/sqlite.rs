// src/storage/sqlite.rs

//! SQLite-backed dedup ledger.
//!
//! A single `ledger` table keyed on (bucket, item_key) stands in for the
//! bucket/key layout of the store: buckets exist exactly when a row with
//! their name does, so they come into being on first `mark`.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use log::debug;
use rusqlite::{Connection, OptionalExtension, params};

use crate::error::Result;
use crate::storage::DedupLedger;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS ledger (
    bucket   TEXT NOT NULL,
    item_key TEXT NOT NULL,
    done     TEXT NOT NULL DEFAULT '1',
    PRIMARY KEY (bucket, item_key)
)";

/// Embedded SQLite ledger.
///
/// Opened once per process; the caller owns its lifetime. Access is plain
/// read/write with no transaction spanning a check-execute-mark sequence, so
/// two concurrent process instances racing on one (bucket, key) can both
/// pass the check before either marks. Single-instance deployments process
/// items strictly sequentially and are not affected.
pub struct SqliteLedger {
    conn: Mutex<Connection>,
}

impl SqliteLedger {
    /// Open (and if necessary create) the ledger database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("ledger mutex poisoned")
    }
}

impl DedupLedger for SqliteLedger {
    fn exists(&self, bucket: &str, key: &str) -> Result<bool> {
        let conn = self.conn();
        let done: Option<String> = conn
            .query_row(
                "SELECT done FROM ledger WHERE bucket = ?1 AND item_key = ?2",
                params![bucket, key],
                |row| row.get(0),
            )
            .optional()?;

        if done.is_none() {
            let bucket_known = conn
                .prepare("SELECT 1 FROM ledger WHERE bucket = ?1 LIMIT 1")?
                .exists(params![bucket])?;
            if !bucket_known {
                debug!("Bucket '{}' not found in ledger", bucket);
            }
        }

        Ok(done.as_deref() == Some("1"))
    }

    fn mark(&self, bucket: &str, key: &str) -> Result<()> {
        self.conn().execute(
            "INSERT OR IGNORE INTO ledger (bucket, item_key, done) VALUES (?1, ?2, '1')",
            params![bucket, key],
        )?;
        Ok(())
    }
}
