//! Cursor combinators: transform, filter, concatenate, collect.
//!
//! Each combinator wraps its inner cursor(s) rather than copying rows out
//! of them, and forwards `close` so the closing obligation survives
//! composition. `collect_rows` is the terminal consumer: it always closes
//! the cursor it was given, on success and on failure alike.

use std::collections::VecDeque;

use crate::domain::{Cursor, CursorError, Result};

/// Map every row of `cursor` through `f`.
///
/// The row-count hint passes through unchanged: the transform yields
/// exactly as many rows as its input.
pub fn transform<C, F, U>(cursor: C, f: F) -> TransformCursor<C, F, U>
where
    C: Cursor,
    F: FnMut(C::Item) -> U,
{
    TransformCursor {
        inner: cursor,
        f,
        slot: None,
    }
}

/// Keep only the rows of `cursor` matching `predicate`.
///
/// The inner hint remains a valid upper bound (filtering only removes
/// rows) and is passed through.
pub fn filter_rows<C, P>(cursor: C, predicate: P) -> FilterCursor<C, P>
where
    C: Cursor,
    P: FnMut(&C::Item) -> bool,
{
    FilterCursor {
        inner: cursor,
        predicate,
        lookahead: None,
        slot: None,
        pending_err: None,
    }
}

/// Chain `cursors` into one sequence, in order.
///
/// Each part is closed as soon as it drains; closing the concatenation
/// closes every part still open.
pub fn concat<C: Cursor>(cursors: Vec<C>) -> ConcatCursor<C> {
    ConcatCursor {
        parts: VecDeque::from(cursors),
        closed: false,
    }
}

/// Drain `cursor` into a `Vec` via safe fetches, then close it.
///
/// The cursor is closed on every path out of this function, including
/// failures partway through.
///
/// # Errors
/// Returns the first row-source error encountered while draining.
pub fn collect_rows<C: Cursor>(mut cursor: C) -> Result<Vec<C::Item>> {
    let mut rows = Vec::new();
    if let Some(upper) = cursor.row_count() {
        rows.reserve(upper);
    }

    while cursor.has_next() {
        match cursor.next() {
            Ok(row) => rows.push(row),
            Err(err) => {
                cursor.close();
                return Err(err);
            }
        }
    }

    cursor.close();
    Ok(rows)
}

/// Cursor adapter mapping rows through a function. See [`transform`].
pub struct TransformCursor<C, F, U> {
    inner: C,
    f: F,
    slot: Option<U>,
}

impl<C, F, U> Cursor for TransformCursor<C, F, U>
where
    C: Cursor,
    F: FnMut(C::Item) -> U,
{
    type Item = U;

    fn row_count(&self) -> Option<usize> {
        self.inner.row_count()
    }

    fn has_next(&mut self) -> bool {
        self.inner.has_next()
    }

    fn next(&mut self) -> Result<U> {
        self.inner.next().map(&mut self.f)
    }

    fn fast_next(&mut self) -> Result<&U> {
        let row = (self.f)(self.inner.next()?);
        Ok(self.slot.insert(row))
    }

    fn close(&mut self) {
        self.inner.close();
        self.slot = None;
    }
}

/// Cursor adapter keeping rows that match a predicate. See [`filter_rows`].
pub struct FilterCursor<C: Cursor, P> {
    inner: C,
    predicate: P,
    lookahead: Option<C::Item>,
    slot: Option<C::Item>,
    pending_err: Option<CursorError>,
}

impl<C, P> FilterCursor<C, P>
where
    C: Cursor,
    P: FnMut(&C::Item) -> bool,
{
    /// Pull from the inner cursor until a matching row is buffered.
    fn fill(&mut self) -> Result<()> {
        if let Some(err) = self.pending_err.take() {
            return Err(err);
        }
        if self.lookahead.is_some() {
            return Ok(());
        }
        loop {
            let row = self.inner.next()?;
            if (self.predicate)(&row) {
                self.lookahead = Some(row);
                return Ok(());
            }
        }
    }
}

impl<C, P> Cursor for FilterCursor<C, P>
where
    C: Cursor,
    P: FnMut(&C::Item) -> bool,
{
    type Item = C::Item;

    fn row_count(&self) -> Option<usize> {
        self.inner
            .row_count()
            .map(|n| n + usize::from(self.lookahead.is_some()))
    }

    fn has_next(&mut self) -> bool {
        match self.fill() {
            Ok(()) => true,
            Err(err) if err.is_end() => false,
            Err(err) => {
                self.pending_err = Some(err);
                false
            }
        }
    }

    fn next(&mut self) -> Result<C::Item> {
        self.fill()?;
        self.lookahead.take().ok_or(CursorError::Exhausted)
    }

    fn fast_next(&mut self) -> Result<&C::Item> {
        let row = self.next()?;
        Ok(self.slot.insert(row))
    }

    fn close(&mut self) {
        self.inner.close();
        self.lookahead = None;
        self.slot = None;
        self.pending_err = None;
    }
}

/// Cursor adapter chaining several cursors end to end. See [`concat`].
pub struct ConcatCursor<C> {
    parts: VecDeque<C>,
    closed: bool,
}

impl<C: Cursor> ConcatCursor<C> {
    /// Close and discard drained front parts until one has rows left.
    fn skip_drained(&mut self) {
        while let Some(front) = self.parts.front_mut() {
            if front.has_next() {
                return;
            }
            if let Some(mut done) = self.parts.pop_front() {
                done.close();
            }
        }
    }
}

impl<C: Cursor> Cursor for ConcatCursor<C> {
    type Item = C::Item;

    fn row_count(&self) -> Option<usize> {
        if self.closed {
            return Some(0);
        }
        let mut total = 0usize;
        for part in &self.parts {
            total = total.checked_add(part.row_count()?)?;
        }
        Some(total)
    }

    fn has_next(&mut self) -> bool {
        if self.closed {
            return false;
        }
        self.skip_drained();
        !self.parts.is_empty()
    }

    fn next(&mut self) -> Result<C::Item> {
        if self.closed {
            return Err(CursorError::Closed);
        }
        self.skip_drained();
        match self.parts.front_mut() {
            Some(part) => part.next(),
            None => Err(CursorError::Exhausted),
        }
    }

    fn fast_next(&mut self) -> Result<&C::Item> {
        if self.closed {
            return Err(CursorError::Closed);
        }
        self.skip_drained();
        match self.parts.front_mut() {
            Some(part) => part.fast_next(),
            None => Err(CursorError::Exhausted),
        }
    }

    fn close(&mut self) {
        for part in &mut self.parts {
            part.close();
        }
        self.parts.clear();
        self.closed = true;
    }
}
