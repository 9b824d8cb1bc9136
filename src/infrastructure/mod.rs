//! Infrastructure layer - external adapters (database result sets).
//!
//! This layer holds the cursor implementations that own real resources.

pub mod sqlite;

pub use sqlite::SqliteCursor;
