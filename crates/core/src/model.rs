//! Video records discovered by a scrape and their cached form.

use serde::{Deserialize, Serialize};

/// Title used when a result's title cannot be recovered.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Channel name used when a result's channel cannot be recovered.
pub const UNKNOWN_CHANNEL: &str = "Unknown Channel";

/// One discovered search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub video_id: String,
    pub title: String,
    pub thumbnail: String,
    pub channel_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl VideoRecord {
    /// Medium-quality thumbnail URL for a video id.
    pub fn thumbnail_for(video_id: &str) -> String {
        format!("https://img.youtube.com/vi/{video_id}/mqdefault.jpg")
    }
}

/// Persisted first result for a normalized query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueryCacheEntry {
    /// Normalized query (see [`normalize_query`]).
    pub query: String,
    pub youtube_id: String,
    pub title: String,
    pub thumbnail: String,
    pub channel_title: String,
    pub duration: Option<String>,
    /// RFC 3339 timestamp of the last write.
    pub created_at: String,
}

impl QueryCacheEntry {
    /// Rebuild the record this entry was copied from.
    pub fn to_record(&self) -> VideoRecord {
        VideoRecord {
            video_id: self.youtube_id.clone(),
            title: self.title.clone(),
            thumbnail: self.thumbnail.clone(),
            channel_title: self.channel_title.clone(),
            duration: self.duration.clone(),
        }
    }
}

/// Lowercase and trim a query for use as a cache key.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}
