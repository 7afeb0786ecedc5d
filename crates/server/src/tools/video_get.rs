//! video_get tool implementation.
//!
//! Serves recently discovered videos from the in-memory detail cache.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use vidscout_core::{DetailCache, Error, VideoRecord};

/// Parameters for the video_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VideoGetParams {
    /// Platform video id, as returned by video_search.
    pub video_id: String,
}

pub async fn video_get_impl(details: &DetailCache, params: VideoGetParams) -> Result<CallToolResult, McpError> {
    let video_id = params.video_id.trim();
    if video_id.is_empty() {
        return Err(Error::InvalidInput("video_id cannot be empty".into()).into());
    }

    let record: VideoRecord = details
        .get(video_id)
        .await
        .ok_or_else(|| Error::CacheMiss(video_id.to_string()))?;

    let json = serde_json::to_string_pretty(&record)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize video: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
