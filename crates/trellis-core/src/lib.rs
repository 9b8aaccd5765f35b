//! Core types and trait definitions for the Trellis curriculum graph.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod association;
pub mod catalog;
pub mod clock;
pub mod composer;
pub mod enrollment;
pub mod error;
pub mod reference;
pub mod semester;
pub mod store;
pub mod view;

pub use error::{ConstraintKind, Error, Result};
