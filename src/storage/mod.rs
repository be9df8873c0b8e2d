// src/storage/mod.rs

//! Persistent dedup ledger.
//!
//! The ledger is the sole source of truth for "has this item already
//! triggered its action". Logical schema is `bucket -> { key -> "1" }`:
//! presence with the literal value "1" means done, anything else means
//! not-done. Entries are written once, after a successful command run, and
//! never updated or expired.

pub mod sqlite;

use crate::error::Result;

// Re-export for convenience
pub use sqlite::SqliteLedger;

/// A durable set of (bucket, key) done-markers.
pub trait DedupLedger: Send + Sync {
    /// Whether the pair is already marked done. A bucket that was never
    /// written to is simply "nothing done yet", not an error.
    fn exists(&self, bucket: &str, key: &str) -> Result<bool>;

    /// Record the pair as done. Creates the bucket lazily on first use.
    fn mark(&self, bucket: &str, key: &str) -> Result<()>;
}
