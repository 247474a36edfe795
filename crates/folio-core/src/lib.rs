//! Core types and operations for the Folio page content store.
//!
//! Page content is described by compiled-in [`schema::PageSchema`]s. Every
//! field owns one dotted config key; values live in a flat key/value
//! [`store::ConfigStore`] and are projected back into editor values, public
//! page documents and completion statistics.
//!
//! This crate is deliberately free of HTTP and database dependencies.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod content;
pub mod edit;
pub mod error;
pub mod keys;
pub mod project;
pub mod registry;
pub mod schema;
pub mod site;
pub mod stats;
pub mod store;
pub mod value;

#[cfg(test)]
pub(crate) mod memory;

pub use error::{Error, Result};
