//! Leasehold Storage Layer
//!
//! Implements the `RecordStore` trait on SQLite. Each rental agreement is one
//! row in the `rental_agreements` table, keyed by the source document path.
//! Writes are upserts: storing a record for a path that already exists
//! replaces the previous values, so there is never more than one row per
//! document and no history is kept.
//!
//! # Examples
//!
//! ```no_run
//! use leasehold_store::SqliteStore;
//!
//! let store = SqliteStore::new("leasehold.db").unwrap();
//! // Store is now ready for record operations
//! ```

#![warn(missing_docs)]

use leasehold_domain::traits::RecordStore;
use leasehold_domain::{AgreementRecord, RentalTerms, TermField};
use rusqlite::{params_from_iter, Connection, OptionalExtension, Row};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::debug;

/// Name of the table holding agreement records
pub const TABLE_NAME: &str = "rental_agreements";

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid record
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// SQLite-based implementation of RecordStore
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Share a store across threads by
/// wrapping it in a `Mutex`.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `path`
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open a fresh in-memory database
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::new(":memory:")
    }

    fn initialize_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(include_str!("schema.sql"))?;
        Ok(())
    }

    /// Number of stored records
    pub fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", TABLE_NAME),
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Comma-separated term columns, in `TermField::ALL` order
    fn term_columns() -> String {
        TermField::ALL
            .iter()
            .map(|f| f.attribute())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn select_sql() -> String {
        format!(
            "SELECT agreement_id, {} FROM {}",
            Self::term_columns(),
            TABLE_NAME
        )
    }

    fn upsert_sql() -> String {
        let columns = Self::term_columns();
        let placeholders = (1..=TermField::ALL.len() + 2)
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");
        let updates = TermField::ALL
            .iter()
            .map(|f| format!("{0} = excluded.{0}", f.attribute()))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "INSERT INTO {table} (agreement_id, {columns}, updated_at) VALUES ({placeholders})
             ON CONFLICT(agreement_id) DO UPDATE SET {updates}, updated_at = excluded.updated_at",
            table = TABLE_NAME,
            columns = columns,
            placeholders = placeholders,
            updates = updates,
        )
    }

    fn row_to_record(row: &Row<'_>) -> rusqlite::Result<AgreementRecord> {
        let mut terms = RentalTerms::default();
        for (idx, field) in TermField::ALL.iter().enumerate() {
            terms.set(*field, row.get::<_, String>(idx + 1)?);
        }
        Ok(AgreementRecord {
            agreement_id: row.get(0)?,
            terms,
        })
    }

    fn now_secs() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0)
    }
}

impl RecordStore for SqliteStore {
    type Error = StoreError;

    fn upsert_record(&mut self, record: AgreementRecord) -> Result<(), Self::Error> {
        if record.agreement_id.is_empty() {
            return Err(StoreError::InvalidRecord(
                "agreement_id must not be empty".to_string(),
            ));
        }

        let mut values: Vec<rusqlite::types::Value> = Vec::with_capacity(TermField::ALL.len() + 2);
        values.push(record.agreement_id.clone().into());
        values.extend(record.terms.iter().map(|(_, v)| v.to_string().into()));
        values.push(Self::now_secs().into());

        self.conn.execute(&Self::upsert_sql(), params_from_iter(values))?;
        debug!("Upserted record {}", record.agreement_id);
        Ok(())
    }

    fn get_record(&self, agreement_id: &str) -> Result<Option<AgreementRecord>, Self::Error> {
        let sql = format!("{} WHERE agreement_id = ?1", Self::select_sql());
        let record = self
            .conn
            .query_row(&sql, [agreement_id], Self::row_to_record)
            .optional()?;
        Ok(record)
    }

    fn list_records(&self) -> Result<Vec<AgreementRecord>, Self::Error> {
        let sql = format!("{} ORDER BY agreement_id", Self::select_sql());
        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt
            .query_map([], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    fn delete_record(&mut self, agreement_id: &str) -> Result<bool, Self::Error> {
        let deleted = self.conn.execute(
            &format!("DELETE FROM {} WHERE agreement_id = ?1", TABLE_NAME),
            [agreement_id],
        )?;
        Ok(deleted > 0)
    }
}
