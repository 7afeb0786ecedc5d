//! video_search tool implementation.
//!
//! Runs a fresh scrape through the search service and remembers each
//! discovered video in the detail cache.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use vidscout_client::{DocumentSource, SearchOutcome, SearchService};
use vidscout_core::{DetailCache, Error};

/// Input parameters for the video_search tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct VideoSearchParams {
    /// Free-text search query (required).
    pub query: String,

    /// Result limit, 1-20. Numbers and numeric strings are accepted; anything else means 15.
    #[serde(default)]
    pub max_results: Option<Value>,
}

/// Implementation of the video_search tool.
pub async fn search_impl<S: DocumentSource>(
    service: &SearchService<S>, details: &DetailCache, params: VideoSearchParams,
) -> Result<CallToolResult, McpError> {
    let outcome = service.search(&params.query, params.max_results.as_ref()).await?;
    let json = outcome
        .body()
        .and_then(|body| serde_json::to_string_pretty(&body))
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize search result: {e}")))?;

    match &outcome {
        SearchOutcome::Found(response) => {
            for record in &response.data {
                if let Err(e) = details.set(&record.video_id, record).await {
                    tracing::warn!(video_id = %record.video_id, error = %e, "failed to remember video detail");
                }
            }
            Ok(CallToolResult::success(vec![Content::text(json)]))
        }
        SearchOutcome::NotFound(_) => Ok(CallToolResult::error(vec![Content::text(json)])),
        SearchOutcome::Failed(_) => Err(Error::ServiceUnavailable.into()),
    }
}
