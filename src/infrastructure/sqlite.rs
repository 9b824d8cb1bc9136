//! `SQLite`-backed cursor over a query's result rows.
//!
//! Adapts a live `rusqlite` result set to the cursor contract: rows are
//! stepped and decoded one at a time, the statement's iteration state is
//! released on close, and a `NULL` where the decoder demanded a value is
//! reported as a contract defect instead of an absent element.

use rusqlite::types::Type;
use rusqlite::{Row, Rows};

use crate::domain::{Cursor, CursorError, Result};

/// Cursor over the rows of an executed `SQLite` query.
///
/// Built from the `rusqlite::Rows` of a prepared statement plus a decoder
/// closure that turns each SQL row into a `T`. The row-count hint is
/// unknown unless declared with [`SqliteCursor::with_row_count`] — `SQLite`
/// does not know a result set's size before stepping through it.
///
/// Post-close policy: distinct — `has_next` reports `false` and fetches
/// fail with `Closed`. The result set is also released when the cursor is
/// dropped, so early abandonment does not leak the statement's state.
pub struct SqliteCursor<'stmt, T, F> {
    rows: Option<Rows<'stmt>>,
    decode: F,
    lookahead: Option<T>,
    slot: Option<T>,
    pending_err: Option<CursorError>,
    remaining: Option<usize>,
    fetched: usize,
}

impl<'stmt, T, F> SqliteCursor<'stmt, T, F>
where
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    /// Create a cursor over `rows`, decoding each row with `decode`.
    pub fn new(rows: Rows<'stmt>, decode: F) -> Self {
        Self {
            rows: Some(rows),
            decode,
            lookahead: None,
            slot: None,
            pending_err: None,
            remaining: None,
            fetched: 0,
        }
    }

    /// Declare an upper bound on the number of rows the query can produce,
    /// e.g. from a prior `COUNT(*)` or the query's `LIMIT`.
    #[must_use]
    pub fn with_row_count(mut self, rows: usize) -> Self {
        self.remaining = Some(rows);
        self
    }

    /// Step the result set and decode one row, or report its end.
    fn step(&mut self) -> Result<Option<T>> {
        let Some(rows) = self.rows.as_mut() else {
            return Err(CursorError::Closed);
        };
        match rows.next() {
            Ok(Some(row)) => (self.decode)(row).map(Some).map_err(decode_error),
            Ok(None) => Ok(None),
            Err(err) => Err(CursorError::database(err)),
        }
    }

    /// Make sure one decoded row is buffered, stepping if needed.
    fn fill(&mut self) -> Result<bool> {
        if let Some(err) = self.pending_err.take() {
            return Err(err);
        }
        if self.lookahead.is_some() {
            return Ok(true);
        }
        match self.step()? {
            Some(row) => {
                self.lookahead = Some(row);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn advance(&mut self) -> Result<T> {
        if self.fill()? {
            self.remaining = self.remaining.map(|n| n.saturating_sub(1));
            self.fetched += 1;
            self.lookahead.take().ok_or(CursorError::Exhausted)
        } else {
            Err(CursorError::Exhausted)
        }
    }
}

impl<T, F> SqliteCursor<'_, T, F> {
    fn release(&mut self) {
        if self.rows.take().is_some() {
            tracing::debug!("Closed SQLite cursor after {} rows", self.fetched);
        }
        self.lookahead = None;
        self.slot = None;
        self.pending_err = None;
    }
}

impl<T, F> Cursor for SqliteCursor<'_, T, F>
where
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    type Item = T;

    fn row_count(&self) -> Option<usize> {
        if self.rows.is_none() {
            return Some(0);
        }
        self.remaining
    }

    fn has_next(&mut self) -> bool {
        match self.fill() {
            Ok(more) => more,
            Err(CursorError::Closed) => false,
            Err(err) => {
                // Held for the next fetch; has_next itself stays silent.
                self.pending_err = Some(err);
                false
            }
        }
    }

    fn next(&mut self) -> Result<T> {
        self.advance()
    }

    fn fast_next(&mut self) -> Result<&T> {
        let row = self.advance()?;
        Ok(self.slot.insert(row))
    }

    fn close(&mut self) {
        self.release();
    }
}

impl<T, F> Drop for SqliteCursor<'_, T, F> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Translate a decode failure, distinguishing the absent-row defect.
fn decode_error(err: rusqlite::Error) -> CursorError {
    match err {
        rusqlite::Error::InvalidColumnType(index, ref name, Type::Null) => {
            CursorError::absent_row(format!("column {index} ({name}) is NULL"))
        }
        other => CursorError::database(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;
    use tempfile::tempdir;

    fn seeded_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE people (name TEXT, age INTEGER);
             INSERT INTO people VALUES ('ada', 36), ('brin', 41), ('cleo', 28);",
        )
        .unwrap();
        conn
    }

    #[test]
    fn test_drains_query_rows_in_order() {
        let conn = seeded_connection();
        let mut stmt = conn
            .prepare("SELECT name FROM people ORDER BY name")
            .unwrap();
        let rows = stmt.query([]).unwrap();

        let mut cursor =
            SqliteCursor::new(rows, |row| row.get::<_, String>(0)).with_row_count(3);

        assert_eq!(cursor.row_count(), Some(3));
        assert!(cursor.has_next());
        assert_eq!(cursor.next().unwrap(), "ada");
        assert_eq!(cursor.next().unwrap(), "brin");
        assert_eq!(cursor.row_count(), Some(1));
        assert_eq!(cursor.next().unwrap(), "cleo");
        assert!(!cursor.has_next());
        assert!(matches!(cursor.next(), Err(CursorError::Exhausted)));

        cursor.close();
        cursor.close();
    }

    #[test]
    fn test_unknown_hint_without_declared_bound() {
        let conn = seeded_connection();
        let mut stmt = conn.prepare("SELECT name FROM people").unwrap();
        let rows = stmt.query([]).unwrap();

        let cursor = SqliteCursor::new(rows, |row| row.get::<_, String>(0));

        assert_eq!(cursor.row_count(), None);
    }

    #[test]
    fn test_fast_fetch_reuses_decoded_slot() {
        let conn = seeded_connection();
        let mut stmt = conn
            .prepare("SELECT name FROM people ORDER BY name")
            .unwrap();
        let rows = stmt.query([]).unwrap();

        let mut cursor = SqliteCursor::new(rows, |row| row.get::<_, String>(0));

        let first = cursor.fast_next().unwrap().clone();
        let second = cursor.fast_next().unwrap();

        assert_eq!(first, "ada");
        assert_eq!(second, "brin");
    }

    #[test]
    fn test_null_row_is_a_contract_defect() {
        let conn = seeded_connection();
        conn.execute("INSERT INTO people VALUES (NULL, 50)", [])
            .unwrap();
        let mut stmt = conn
            .prepare("SELECT name FROM people WHERE name IS NULL")
            .unwrap();
        let rows = stmt.query([]).unwrap();

        let mut cursor = SqliteCursor::new(rows, |row| row.get::<_, String>(0));

        assert!(matches!(
            cursor.next(),
            Err(CursorError::AbsentRow { .. })
        ));
    }

    #[test]
    fn test_closed_policy_is_distinct() {
        let conn = seeded_connection();
        let mut stmt = conn.prepare("SELECT name FROM people").unwrap();
        let rows = stmt.query([]).unwrap();

        let mut cursor = SqliteCursor::new(rows, |row| row.get::<_, String>(0));
        cursor.next().unwrap();
        cursor.close();

        assert!(!cursor.has_next());
        assert!(matches!(cursor.next(), Err(CursorError::Closed)));
        assert_eq!(cursor.row_count(), Some(0));
    }

    #[test]
    fn test_file_backed_database_round_trip() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("rows.db");

        let conn = Connection::open(&db_path).unwrap();
        conn.execute_batch(
            "CREATE TABLE readings (value INTEGER);
             INSERT INTO readings VALUES (10), (20), (30);",
        )
        .unwrap();

        let mut stmt = conn
            .prepare("SELECT value FROM readings ORDER BY value")
            .unwrap();
        let rows = stmt.query([]).unwrap();
        let mut cursor = SqliteCursor::new(rows, |row| row.get::<_, i64>(0));

        let mut drained = Vec::new();
        while cursor.has_next() {
            drained.push(cursor.next().unwrap());
        }
        cursor.close();

        assert_eq!(drained, vec![10, 20, 30]);
    }

    #[test]
    fn test_has_next_buffers_without_advancing() {
        let conn = seeded_connection();
        let mut stmt = conn
            .prepare("SELECT name FROM people ORDER BY name")
            .unwrap();
        let rows = stmt.query([]).unwrap();

        let mut cursor = SqliteCursor::new(rows, |row| row.get::<_, String>(0));

        assert!(cursor.has_next());
        assert!(cursor.has_next());
        assert_eq!(cursor.next().unwrap(), "ada");
    }
}
