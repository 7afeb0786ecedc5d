//! Query cache MCP tools.
//!
//! This module provides tools for inspecting and pruning the SQLite query cache.

pub mod get;
pub mod purge;

pub use get::{QueryCacheGetParams, get_impl};
pub use purge::{QueryCachePurgeParams, purge_impl};
