//! Domain layer - the cursor contract and its pure adapters.
//!
//! This layer contains the trait, error taxonomy, iteration views, and
//! in-memory adapters, without any I/O dependencies.

pub mod cursor;
pub mod error;
pub mod mem;
pub mod polling;
pub mod rows;

pub use cursor::Cursor;
pub use error::{CursorError, Result};
pub use mem::{IterCursor, VecCursor};
pub use polling::{PollSource, PollingCursor};
pub use rows::{FastRows, Rows};
