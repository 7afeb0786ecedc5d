//! query_cache_get tool implementation.
//!
//! Retrieves the remembered first result for a query.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use vidscout_core::{CacheDb, Error, QueryCacheEntry};

/// Parameters for the query_cache_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct QueryCacheGetParams {
    /// The search query; case and surrounding whitespace are ignored.
    pub query: String,
}

/// Output from the query_cache_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct QueryCacheGetOutput {
    pub entry: QueryCacheEntry,
}

/// Implementation of the query_cache_get tool.
pub async fn get_impl(cache: &CacheDb, params: QueryCacheGetParams) -> Result<CallToolResult, McpError> {
    if params.query.trim().is_empty() {
        return Err(Error::InvalidInput("query cannot be empty".into()).into());
    }

    let entry = cache
        .read_query_result(&params.query)
        .await?
        .ok_or_else(|| Error::CacheMiss(params.query.clone()))?;

    let output = QueryCacheGetOutput { entry };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize cache entry: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
