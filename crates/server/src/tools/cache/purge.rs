//! query_cache_purge tool implementation.
//!
//! Purges query cache entries by age.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use vidscout_core::{CacheDb, Error};

/// Parameters for the query_cache_purge tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct QueryCachePurgeParams {
    /// Purge entries last written more than this many days ago. 0 purges everything.
    pub older_than_days: i64,
}

/// Output from the query_cache_purge tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct QueryCachePurgeOutput {
    /// Number of entries deleted.
    pub deleted: u64,
}

/// Implementation of the query_cache_purge tool.
pub async fn purge_impl(cache: &CacheDb, params: QueryCachePurgeParams) -> Result<CallToolResult, McpError> {
    let deleted = cache.purge_query_results_older_than(params.older_than_days).await?;
    tracing::info!(older_than_days = params.older_than_days, deleted, "purged query cache");

    let output = QueryCachePurgeOutput { deleted };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
