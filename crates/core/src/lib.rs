//! Core types and shared functionality for vidscout.
//!
//! This crate provides:
//! - The video record data model
//! - Query cache with SQLite backend and an in-memory detail cache
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod model;

pub use cache::{CacheDb, DetailCache};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use model::{QueryCacheEntry, VideoRecord, normalize_query};
