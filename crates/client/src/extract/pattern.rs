//! Fallback extraction by scanning the raw document with regular expressions.
//!
//! Ids, first-run titles and first-run owner names are matched independently
//! and zipped by position. Nothing guarantees the three streams line up, so
//! this only runs when the initial-data path finds nothing.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use vidscout_core::VideoRecord;
use vidscout_core::model::{UNKNOWN_CHANNEL, UNKNOWN_TITLE};

use super::ExtractionStrategy;

static VIDEO_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""videoId":"([^"\\]+)""#).expect("invalid regex"));

static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""title":\{"runs":\[\{"text":"((?:[^"\\]|\\.)*)""#).expect("invalid regex"));

static OWNER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""ownerText":\{"runs":\[\{"text":"((?:[^"\\]|\\.)*)""#).expect("invalid regex"));

/// Positional regex extraction over the raw page text.
#[derive(Debug, Default, Clone, Copy)]
pub struct PatternStrategy;

impl ExtractionStrategy for PatternStrategy {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn extract(&self, html: &str, max_results: usize) -> Vec<VideoRecord> {
        let ids = captures(&VIDEO_ID, html);
        let titles = captures(&TITLE, html);
        let channels = captures(&OWNER, html);

        let limit = ids.len().min(titles.len()).min(max_results);
        tracing::debug!(
            ids = ids.len(),
            titles = titles.len(),
            channels = channels.len(),
            limit,
            "pattern scan"
        );

        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(limit);

        for (i, (id, title)) in ids.iter().zip(&titles).enumerate() {
            if records.len() >= max_results {
                break;
            }
            if !seen.insert(id.as_str()) {
                continue;
            }

            let title = if title.is_empty() { UNKNOWN_TITLE.to_string() } else { title.clone() };
            let channel_title = channels
                .get(i)
                .filter(|c| !c.is_empty())
                .cloned()
                .unwrap_or_else(|| UNKNOWN_CHANNEL.to_string());

            records.push(VideoRecord {
                video_id: id.clone(),
                title,
                thumbnail: VideoRecord::thumbnail_for(id),
                channel_title,
                duration: None,
            });
        }

        records
    }
}

/// First capture group of every match, with JSON string escapes decoded.
fn captures(re: &Regex, text: &str) -> Vec<String> {
    re.captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| unescape_json(m.as_str()))
        .collect()
}

/// Decode `\uXXXX`, `\"` and friends; the raw text is kept if it is not a valid JSON string body.
fn unescape_json(raw: &str) -> String {
    if !raw.contains('\\') {
        return raw.to_string();
    }
    serde_json::from_str::<String>(&format!("\"{raw}\"")).unwrap_or_else(|_| raw.to_string())
}
