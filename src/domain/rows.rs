//! Single-pass iteration views over a cursor.
//!
//! Both views hold a mutable back-reference to the cursor rather than a
//! copy of its state, so they share its position and its closing. Neither
//! can be restarted: once the cursor is drained or closed, a new view is
//! empty from the first call.

use crate::domain::cursor::Cursor;
use crate::domain::error::Result;

/// Plain-iterator view over a cursor, driven by safe fetches.
///
/// Exhaustion and post-close use both end the iteration; a row-source
/// failure also ends it, after being logged, because [`Iterator`] has no
/// error channel.
pub struct Rows<'c, C: Cursor + ?Sized> {
    cursor: &'c mut C,
}

impl<'c, C: Cursor + ?Sized> Rows<'c, C> {
    pub(crate) fn new(cursor: &'c mut C) -> Self {
        Self { cursor }
    }
}

impl<C: Cursor + ?Sized> Iterator for Rows<'_, C> {
    type Item = C::Item;

    fn next(&mut self) -> Option<C::Item> {
        match self.cursor.next() {
            Ok(row) => Some(row),
            Err(err) if err.is_end() => None,
            Err(err) => {
                tracing::warn!("Row source failed mid-iteration: {err}");
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.cursor.row_count())
    }
}

/// Lending view over a cursor, driven by fast fetches.
///
/// Each call to [`FastRows::next`] lends the row out of the cursor's reuse
/// slot; the borrow ends before the next call can be made, which is what
/// lets the cursor recycle the slot. Use this for bulk loops that finish
/// with every row before advancing.
pub struct FastRows<'c, C: Cursor + ?Sized> {
    cursor: &'c mut C,
}

impl<'c, C: Cursor + ?Sized> FastRows<'c, C> {
    pub(crate) fn new(cursor: &'c mut C) -> Self {
        Self { cursor }
    }

    /// Lend the next row, or `None` once the cursor is drained or closed.
    ///
    /// A row-source failure also ends the sequence, after being logged;
    /// callers that need the error itself should drive
    /// [`Cursor::fast_next`] directly.
    pub fn next(&mut self) -> Option<&C::Item> {
        match self.cursor.fast_next() {
            Ok(row) => Some(row),
            Err(err) if err.is_end() => None,
            Err(err) => {
                tracing::warn!("Row source failed mid-iteration: {err}");
                None
            }
        }
    }

    /// Run `f` over every remaining row.
    pub fn for_each<F>(mut self, mut f: F)
    where
        F: FnMut(&C::Item),
    {
        while let Some(row) = self.next() {
            f(row);
        }
    }

    /// Run `f` over every remaining row, stopping at the first error.
    ///
    /// # Errors
    /// Returns the first error produced by `f`.
    pub fn try_for_each<F>(mut self, mut f: F) -> Result<()>
    where
        F: FnMut(&C::Item) -> Result<()>,
    {
        while let Some(row) = self.next() {
            f(row)?;
        }
        Ok(())
    }
}
