//! The ledger's local store — the single source of truth for records.

use crate::error::{StorageError, StorageResult};
use chrono::NaiveDate;
use ledger_types::{NewRecord, Record};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Current schema version, stored in SQLite's `user_version` pragma.
const SCHEMA_VERSION: i32 = 1;

/// Durable record store backed by SQLite.
///
/// Identity is assigned by the store via `AUTOINCREMENT`, so ids are
/// monotonic and never reused after deletion. Cheap to clone; clones share
/// the underlying connection.
#[derive(Clone)]
pub struct LedgerStore {
    conn: Arc<Mutex<Connection>>,
}

impl LedgerStore {
    /// Opens or creates a store at the given path, running migrations as
    /// needed. Idempotent across calls within a process lifetime.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;
        migrate(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Opens an in-memory store (for testing).
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        migrate(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Inserts a record; the store assigns the next identity and returns it.
    pub fn add(&self, record: &NewRecord) -> StorageResult<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO records (date, category, payment, amount, note) VALUES (?, ?, ?, ?, ?)",
            params![
                record.date.to_string(),
                record.category,
                record.payment,
                record.amount,
                record.note,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Returns all records ordered by date descending, ties broken by
    /// insertion order. An empty store yields an empty vec, never an error.
    pub fn list_all(&self) -> StorageResult<Vec<Record>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, date, category, payment, amount, note FROM records \
             ORDER BY date DESC, id ASC",
        )?;
        let rows: Vec<(i64, String, String, String, f64, String)> = stmt
            .query_map([], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                ))
            })?
            .collect::<Result<_, _>>()?;

        let mut records = Vec::with_capacity(rows.len());
        for (id, date, category, payment, amount, note) in rows {
            let date: NaiveDate = date
                .parse()
                .map_err(|e| StorageError::Corrupt(format!("record {id} has bad date: {e}")))?;
            records.push(Record {
                id,
                date,
                category,
                payment,
                amount,
                note,
            });
        }
        Ok(records)
    }

    /// Removes the record with the given id. A missing id is a no-op, not an
    /// error.
    pub fn delete_by_id(&self, id: i64) -> StorageResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM records WHERE id = ?", params![id])?;
        Ok(())
    }

    /// Atomically empties the table and re-inserts every given record, each
    /// with a fresh identity — any foreign id in the input is discarded.
    ///
    /// Used only by remote-pull reconciliation.
    pub fn clear_and_replace(&self, records: &[Record]) -> StorageResult<()> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM records", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO records (date, category, payment, amount, note) \
                 VALUES (?, ?, ?, ?, ?)",
            )?;
            for rec in records {
                stmt.execute(params![
                    rec.date.to_string(),
                    rec.category,
                    rec.payment,
                    rec.amount,
                    rec.note,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Number of records currently stored.
    pub fn count(&self) -> StorageResult<usize> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

/// Schema upgrade hook. Runs every migration whose version is newer than the
/// stored `user_version`, then stamps the new version.
fn migrate(conn: &Connection) -> StorageResult<()> {
    let version: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    if version < 1 {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS records (
                id       INTEGER PRIMARY KEY AUTOINCREMENT,
                date     TEXT NOT NULL,
                category TEXT NOT NULL,
                payment  TEXT NOT NULL,
                amount   REAL NOT NULL,
                note     TEXT NOT NULL DEFAULT ''
            );
            CREATE INDEX IF NOT EXISTS idx_records_date ON records(date);
            "#,
        )?;
    }

    if version != SCHEMA_VERSION {
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    }
    Ok(())
}
