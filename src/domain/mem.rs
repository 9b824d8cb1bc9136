//! In-memory cursor adapters.
//!
//! These are the reference implementations of the contract: they hold no
//! external resource, so `close` only drops the buffered rows, but they
//! observe every rule the contract states — ordering, the row-count upper
//! bound, exhaustion, and idempotent close.

use std::iter::Peekable;

use crate::domain::cursor::Cursor;
use crate::domain::error::{CursorError, Result};

/// Cursor over an owned `Vec` of rows.
///
/// The row-count hint is the exact number of rows remaining (an exact
/// count is a valid upper bound). Post-close policy: distinct — `has_next`
/// reports `false` and fetches fail with `Closed`.
pub struct VecCursor<T> {
    rows: Option<std::vec::IntoIter<T>>,
    slot: Option<T>,
}

impl<T> VecCursor<T> {
    /// Create a cursor positioned before the first row of `rows`.
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            rows: Some(rows.into_iter()),
            slot: None,
        }
    }

    /// Create a cursor over no rows at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> Cursor for VecCursor<T> {
    type Item = T;

    fn row_count(&self) -> Option<usize> {
        Some(self.rows.as_ref().map_or(0, ExactSizeIterator::len))
    }

    fn has_next(&mut self) -> bool {
        self.rows.as_ref().is_some_and(|rows| rows.len() > 0)
    }

    fn next(&mut self) -> Result<T> {
        match self.rows.as_mut() {
            Some(rows) => rows.next().ok_or(CursorError::Exhausted),
            None => Err(CursorError::Closed),
        }
    }

    fn fast_next(&mut self) -> Result<&T> {
        let row = self.next()?;
        Ok(self.slot.insert(row))
    }

    fn close(&mut self) {
        self.rows = None;
        self.slot = None;
    }
}

/// Cursor wrapping an arbitrary [`Iterator`].
///
/// The row-count hint is the iterator's upper size bound, which is exactly
/// the contract's hint: an upper limit or unknown. Post-close policy:
/// exhausted-style — fetches after `close` fail with `Exhausted`, the same
/// as running off the end.
pub struct IterCursor<I: Iterator> {
    iter: Option<Peekable<I>>,
    slot: Option<I::Item>,
}

impl<I: Iterator> IterCursor<I> {
    /// Create a cursor positioned before the iterator's first element.
    pub fn new(iter: I) -> Self {
        Self {
            iter: Some(iter.peekable()),
            slot: None,
        }
    }
}

impl<I: Iterator> Cursor for IterCursor<I> {
    type Item = I::Item;

    fn row_count(&self) -> Option<usize> {
        match self.iter.as_ref() {
            Some(iter) => iter.size_hint().1,
            None => Some(0),
        }
    }

    fn has_next(&mut self) -> bool {
        self.iter.as_mut().is_some_and(|iter| iter.peek().is_some())
    }

    fn next(&mut self) -> Result<I::Item> {
        self.iter
            .as_mut()
            .and_then(Iterator::next)
            .ok_or(CursorError::Exhausted)
    }

    fn fast_next(&mut self) -> Result<&I::Item> {
        let row = self.next()?;
        Ok(self.slot.insert(row))
    }

    fn close(&mut self) {
        self.iter = None;
        self.slot = None;
    }
}
