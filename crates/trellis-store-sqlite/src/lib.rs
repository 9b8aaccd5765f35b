//! SQLite backend for the Trellis curriculum store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! pool without blocking the async runtime. Failures are classified into the
//! `trellis-core` error taxonomy at this boundary.

mod encode;
mod error;
mod schema;
mod store;

pub use store::SqliteStore;

#[cfg(test)]
mod tests;
