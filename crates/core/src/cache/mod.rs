//! Caching layer for search results and track details.
//!
//! Two independent stores live here:
//!
//! - A persistent SQLite query cache (via tokio-rusqlite) that memoizes the first
//!   result per normalized query. Writes are UPSERTs, so each query has at most one row.
//! - An in-memory detail cache with a fixed TTL for identifier-keyed lookups.

pub mod connection;
pub mod detail;
pub mod migrations;
pub mod query;

pub use crate::Error;

pub use connection::CacheDb;
pub use detail::{DETAIL_TTL, DetailCache};
