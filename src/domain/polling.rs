//! Polling cursors that recycle a single row slot.
//!
//! A [`PollSource`] refills a caller-owned row in place instead of
//! allocating a fresh one per element. [`PollingCursor`] turns such a
//! source into a full cursor: fast fetches lend the slot straight out,
//! safe fetches clone it, and `has_next` buffers one lookahead poll
//! without moving the observable position.

use crate::domain::cursor::Cursor;
use crate::domain::error::{CursorError, Result};

/// A row producer that writes each element into a caller-owned row.
pub trait PollSource {
    /// The row type this source refills.
    type Row;

    /// Upper bound on the rows this source can still produce, if known.
    fn row_count(&self) -> Option<usize> {
        None
    }

    /// Refill `row` in place with the next element.
    ///
    /// Returns `Ok(true)` when `row` now holds the next element, `Ok(false)`
    /// once the source is drained. Must never leave `row` holding a partial
    /// or absent value when it returns `Ok(true)`.
    ///
    /// # Errors
    /// Returns an error if producing the next element fails.
    fn poll(&mut self, row: &mut Self::Row) -> Result<bool>;

    /// Release whatever the source holds. Called once, from `close`.
    fn release(&mut self) {}
}

/// Cursor over a [`PollSource`], owning the one row slot the source refills.
///
/// The slot's address is stable for the cursor's lifetime; only its
/// contents change from fetch to fetch. Post-close policy: distinct —
/// fetches after `close` fail with `Closed`.
pub struct PollingCursor<S: PollSource> {
    source: S,
    slot: S::Row,
    looked_ahead: bool,
    drained: bool,
    closed: bool,
    pending_err: Option<CursorError>,
}

impl<S: PollSource> PollingCursor<S> {
    /// Create a cursor over `source`.
    ///
    /// `seed` is the initial slot value; it is scratch storage for the
    /// first poll and is never yielded itself.
    pub fn new(source: S, seed: S::Row) -> Self {
        Self {
            source,
            slot: seed,
            looked_ahead: false,
            drained: false,
            closed: false,
            pending_err: None,
        }
    }

    /// Make sure the slot holds the next unconsumed row, polling if needed.
    fn ensure_polled(&mut self) -> Result<bool> {
        if self.closed {
            return Err(CursorError::Closed);
        }
        if let Some(err) = self.pending_err.take() {
            return Err(err);
        }
        if self.looked_ahead {
            return Ok(true);
        }
        if self.drained {
            return Ok(false);
        }
        match self.source.poll(&mut self.slot) {
            Ok(true) => {
                self.looked_ahead = true;
                Ok(true)
            }
            Ok(false) => {
                self.drained = true;
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    fn release_source(&mut self) {
        if !self.closed {
            self.source.release();
            self.closed = true;
        }
    }
}

impl<S: PollSource> Cursor for PollingCursor<S>
where
    S::Row: Clone,
{
    type Item = S::Row;

    fn row_count(&self) -> Option<usize> {
        if self.closed || self.drained {
            return Some(0);
        }
        // The buffered lookahead row has already left the source's count.
        self.source
            .row_count()
            .map(|n| n + usize::from(self.looked_ahead))
    }

    fn has_next(&mut self) -> bool {
        match self.ensure_polled() {
            Ok(more) => more,
            Err(CursorError::Closed) => false,
            Err(err) => {
                // Held for the next fetch; has_next itself stays silent.
                self.pending_err = Some(err);
                false
            }
        }
    }

    fn next(&mut self) -> Result<S::Row> {
        if self.ensure_polled()? {
            self.looked_ahead = false;
            Ok(self.slot.clone())
        } else {
            Err(CursorError::Exhausted)
        }
    }

    fn fast_next(&mut self) -> Result<&S::Row> {
        if self.ensure_polled()? {
            self.looked_ahead = false;
            Ok(&self.slot)
        } else {
            Err(CursorError::Exhausted)
        }
    }

    fn close(&mut self) {
        self.release_source();
    }
}

impl<S: PollSource> Drop for PollingCursor<S> {
    fn drop(&mut self) {
        self.release_source();
    }
}
