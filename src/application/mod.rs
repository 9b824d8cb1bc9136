//! Application layer - operations composed over the cursor contract.
//!
//! This layer contains the combinators and terminal consumers built on
//! top of the domain trait, independent of any concrete row source.

pub mod compose;

pub use compose::{
    collect_rows, concat, filter_rows, transform, ConcatCursor, FilterCursor, TransformCursor,
};
