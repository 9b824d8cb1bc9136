//! Domain-level error types for row cursors.
//!
//! All errors are typed with `thiserror` and surface synchronously at the
//! offending call; the cursor itself never retries, suppresses, or logs
//! them away.

use thiserror::Error;

/// Errors raised by cursor operations.
///
/// `Exhausted` and `Closed` are consumer errors: they signal that iteration
/// should have stopped, or that an already-released cursor was used again.
/// `AbsentRow` is a producer defect — a broken invariant, not a normal end
/// condition. `Database` carries failures from a concrete row source.
#[derive(Error, Debug)]
pub enum CursorError {
    /// No more rows remain in the cursor.
    #[error("No more rows in cursor")]
    Exhausted,

    /// The cursor was used after `close`.
    ///
    /// Only raised by adapters whose documented post-close policy
    /// distinguishes this from exhaustion.
    #[error("Cursor has been closed")]
    Closed,

    /// The underlying producer yielded a null/absent row.
    ///
    /// Cursors never hand absent rows to consumers; an adapter that
    /// encounters one fails loudly with this variant instead.
    #[error("Absent row from producer: {message}")]
    AbsentRow { message: String },

    /// The underlying row source failed while stepping or decoding.
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl CursorError {
    /// Create a database error from a rusqlite error.
    pub fn database(err: rusqlite::Error) -> Self {
        Self::Database {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// Create an absent-row defect with context.
    pub fn absent_row(message: impl Into<String>) -> Self {
        Self::AbsentRow {
            message: message.into(),
        }
    }

    /// Whether this error marks the normal end of iteration rather than
    /// a failure (`Exhausted`, or `Closed` under the exhausted-style
    /// post-close policy).
    #[must_use]
    pub const fn is_end(&self) -> bool {
        matches!(self, Self::Exhausted | Self::Closed)
    }
}

/// Result type alias using `CursorError`.
pub type Result<T> = std::result::Result<T, CursorError>;
