//! MCP tool implementations.
//!
//! This module contains all tools exposed by the vidscout server.

pub mod cache;
pub mod video_get;
pub mod video_search;
