//! Forward-only, closable cursors over rows pulled from external sources.
//!
//! A [`Cursor`] is the uniform consumption interface for data coming out of
//! database result sets, file readers, and similar producers: a single-pass
//! sequence of non-null rows that must be explicitly released. It is not a
//! plain iterator — iterators carry no closing obligation — and it offers
//! two fetch modes: a safe one that returns owned rows, and a fast one that
//! lends rows out of a reusable slot for allocation-sensitive loops.
//!
//! ```
//! use rowcursor::{Cursor, VecCursor};
//!
//! let mut names = VecCursor::new(vec!["ada".to_string(), "brin".to_string()]);
//! assert_eq!(names.row_count(), Some(2));
//!
//! while names.has_next() {
//!     let name = names.next().unwrap();
//!     println!("{name}");
//! }
//!
//! names.close();
//! ```
//!
//! Bulk loops that finish with each row before advancing can skip the
//! per-row allocation with the fast view:
//!
//! ```
//! use rowcursor::{Cursor, VecCursor};
//!
//! let mut names = VecCursor::new(vec!["ada".to_string(), "brin".to_string()]);
//! let mut total_len = 0;
//! names.fast().for_each(|name| total_len += name.len());
//! names.close();
//! assert_eq!(total_len, 7);
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

// Public re-exports for the top-level API
pub use application::{collect_rows, concat, filter_rows, transform};
pub use domain::{
    Cursor, CursorError, FastRows, IterCursor, PollSource, PollingCursor, Result, Rows, VecCursor,
};
pub use infrastructure::SqliteCursor;
