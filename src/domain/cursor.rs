//! The cursor contract: forward-only, closable sequences of rows.
//!
//! A cursor is a single-pass handle over rows pulled from an underlying
//! source (a database result set, a file reader, an in-memory collection).
//! Unlike a plain iterator it carries a closing obligation: the cursor owns
//! the source's resource handle for its open lifetime, and the consumer
//! must release it via [`Cursor::close`] on every exit path.

use crate::domain::error::Result;
use crate::domain::rows::{FastRows, Rows};

/// A forward-only, closable sequence of non-null rows.
///
/// Cursors move through three states: open with rows remaining, open but
/// exhausted, and closed. Fetching from an exhausted cursor fails with
/// [`CursorError::Exhausted`] without advancing further; `close` is
/// terminal and may be called from any state, any number of times.
///
/// Two fetch modes are exposed. [`Cursor::next`] returns an owned row that
/// stays valid no matter what the cursor does afterwards. [`Cursor::fast_next`]
/// lends a row out of a slot the cursor is allowed to overwrite on the next
/// fetch — the borrow cannot outlive the next advance, so the reduced
/// allocation cost is paid for with a retention limit the compiler enforces.
///
/// Cursors deliberately do not implement [`Iterator`]: an iterator carries
/// no closing obligation, and generic iterator code would silently drop it.
/// The [`Cursor::rows`] view implements `Iterator` for single-pass
/// consumption while the cursor itself keeps ownership of the resource.
///
/// After `close`, an adapter either fails fetches with
/// [`CursorError::Closed`] or reports exhaustion; each adapter documents
/// which policy it applies and applies it consistently.
///
/// Cursors are single-consumer: sharing one across threads is unsupported,
/// and callers that need to must serialize all access themselves.
///
/// [`CursorError::Exhausted`]: crate::domain::error::CursorError::Exhausted
/// [`CursorError::Closed`]: crate::domain::error::CursorError::Closed
pub trait Cursor {
    /// The row type produced by this cursor.
    type Item;

    /// Upper bound on the number of rows still to come, or `None` when the
    /// source cannot say.
    ///
    /// The bound is never a promise of an exact count — the cursor may
    /// produce fewer rows. Never fails and never moves the position.
    fn row_count(&self) -> Option<usize>;

    /// Whether another row can be fetched.
    ///
    /// Safe to call repeatedly without advancing the position. After the
    /// cursor or its source has been closed this may report `false` even if
    /// unread rows logically existed — closing forfeits the remainder.
    fn has_next(&mut self) -> bool;

    /// Fetch the next row as an owned value, safe to retain indefinitely.
    ///
    /// # Errors
    /// Fails with `Exhausted` when no rows remain, or per the adapter's
    /// documented post-close policy after `close`.
    fn next(&mut self) -> Result<Self::Item>;

    /// Fetch the next row into the cursor's reuse slot and lend it out.
    ///
    /// Position advancement and error conditions match [`Cursor::next`],
    /// but the returned borrow points at storage the cursor may overwrite
    /// on the next fetch of either kind. Loops that finish with each row
    /// before advancing can use this to skip the per-row allocation.
    ///
    /// # Errors
    /// Same conditions as [`Cursor::next`].
    fn fast_next(&mut self) -> Result<&Self::Item>;

    /// Release the underlying resource.
    ///
    /// Idempotent and infallible: repeated calls are no-ops, and failures
    /// encountered while releasing are logged, never raised.
    fn close(&mut self);

    /// View this cursor as a plain [`Iterator`] driven by safe fetches.
    ///
    /// The view shares the cursor's position and closing — it is a window,
    /// not a fresh pass. Requesting it again once the cursor is consumed or
    /// closed yields a view that is immediately empty.
    #[must_use]
    fn rows(&mut self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows::new(self)
    }

    /// View this cursor as a lending sequence driven by fast fetches.
    ///
    /// Shares position and closing with the cursor, like [`Cursor::rows`].
    #[must_use]
    fn fast(&mut self) -> FastRows<'_, Self>
    where
        Self: Sized,
    {
        FastRows::new(self)
    }
}

impl<C: Cursor + ?Sized> Cursor for Box<C> {
    type Item = C::Item;

    fn row_count(&self) -> Option<usize> {
        (**self).row_count()
    }

    fn has_next(&mut self) -> bool {
        (**self).has_next()
    }

    fn next(&mut self) -> Result<Self::Item> {
        (**self).next()
    }

    fn fast_next(&mut self) -> Result<&Self::Item> {
        (**self).fast_next()
    }

    fn close(&mut self) {
        (**self).close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mem::VecCursor;

    #[test]
    fn test_boxed_cursor_delegates() {
        let mut cursor: Box<dyn Cursor<Item = i32>> = Box::new(VecCursor::new(vec![1, 2]));

        assert_eq!(cursor.row_count(), Some(2));
        assert!(cursor.has_next());
        assert_eq!(cursor.next().unwrap(), 1);
        assert_eq!(cursor.next().unwrap(), 2);
        assert!(!cursor.has_next());

        cursor.close();
        assert_eq!(cursor.row_count(), Some(0));
    }
}
