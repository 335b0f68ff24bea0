//! Core domain and reconciliation logic for showdesk sync.
//!
//! This crate is pure logic: domain models for shows, trials, classes and
//! entries, the wire record encoder, and the upload/download reconciliation
//! engine. Storage and HTTP live behind the repository and [`sync::RemoteStore`]
//! traits implemented by the sibling crates.

pub mod classes;
pub mod entries;
pub mod errors;
pub mod license;
pub mod shows;
pub mod sync;
pub mod trials;
pub mod utils;

pub use errors::{Error, Result};
