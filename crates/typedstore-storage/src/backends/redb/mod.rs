//! Redb raw store backend.
//!
//! All entries live in a single redb table. Writes run in their own
//! transaction, and cursors read from a snapshot taken when they open.

mod cursor;
mod maintenance;
mod store;
mod tables;

pub use cursor::RedbCursor;
pub use store::RedbStore;
