//! Primary extraction from the page's embedded initial-state JSON.
//!
//! The results page assigns its client-side state to `ytInitialData` inside a
//! `<script>` block. Each block carrying that assignment is decoded and walked
//! along `contents → twoColumnSearchResultsRenderer → primaryContents →
//! sectionListRenderer → contents[] → itemSectionRenderer → contents[]`.
//! Only `videoRenderer` items become records.

use scraper::{Html, Selector};
use serde_json::Value;
use std::collections::HashSet;
use vidscout_core::VideoRecord;
use vidscout_core::model::{UNKNOWN_CHANNEL, UNKNOWN_TITLE};

use super::json_scan::json_after_marker;
use super::{ExtractionParseError, ExtractionStrategy};

/// Assignment markers, most specific first.
const MARKERS: &[&str] = &["var ytInitialData =", "window[\"ytInitialData\"] =", "ytInitialData ="];

const SECTIONS_PATH: &str = "/contents/twoColumnSearchResultsRenderer/primaryContents/sectionListRenderer/contents";

/// Extraction from the embedded `ytInitialData` state.
pub struct InitialDataStrategy {
    scripts: Selector,
}

impl InitialDataStrategy {
    pub fn new() -> Self {
        Self { scripts: Selector::parse("script").expect("invalid selector") }
    }
}

impl Default for InitialDataStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionStrategy for InitialDataStrategy {
    fn name(&self) -> &'static str {
        "initial-data"
    }

    fn extract(&self, html: &str, max_results: usize) -> Vec<VideoRecord> {
        let document = Html::parse_document(html);
        let mut seen = HashSet::new();
        let mut records = Vec::new();

        for (index, script) in document.select(&self.scripts).enumerate() {
            if records.len() >= max_results {
                break;
            }

            let text: String = script.text().collect();
            if !MARKERS.iter().any(|m| text.contains(m)) {
                continue;
            }

            let data = match decode_block(&text) {
                Ok(data) => data,
                Err(e) => {
                    tracing::warn!(block = index, error = %e, "skipping unusable initial data block");
                    continue;
                }
            };

            let sections = match data.pointer(SECTIONS_PATH).and_then(Value::as_array) {
                Some(sections) => sections,
                None => {
                    let e = ExtractionParseError::MissingPath("sectionListRenderer.contents");
                    tracing::warn!(block = index, error = %e, "skipping unusable initial data block");
                    continue;
                }
            };

            let renderers = sections
                .iter()
                .filter_map(|section| section.pointer("/itemSectionRenderer/contents").and_then(Value::as_array))
                .flatten()
                .filter_map(|item| item.get("videoRenderer"));

            for renderer in renderers {
                if records.len() >= max_results {
                    break;
                }
                if let Some(record) = record_from_renderer(renderer)
                    && seen.insert(record.video_id.clone())
                {
                    records.push(record);
                }
            }
        }

        records
    }
}

/// Decode the JSON assigned by the first marker present in `text`.
fn decode_block(text: &str) -> Result<Value, ExtractionParseError> {
    let json = MARKERS
        .iter()
        .find(|m| text.contains(*m))
        .and_then(|m| json_after_marker(text, m))
        .ok_or(ExtractionParseError::Unterminated)?;
    Ok(serde_json::from_str(json)?)
}

fn non_empty_str<'a>(value: &'a Value, pointer: &str) -> Option<&'a str> {
    value.pointer(pointer).and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Build a record from one `videoRenderer`; None without a video id.
fn record_from_renderer(renderer: &Value) -> Option<VideoRecord> {
    let video_id = non_empty_str(renderer, "/videoId")?.to_string();

    let title = non_empty_str(renderer, "/title/runs/0/text")
        .or_else(|| non_empty_str(renderer, "/title/simpleText"))
        .unwrap_or(UNKNOWN_TITLE)
        .to_string();

    let thumbnail = non_empty_str(renderer, "/thumbnail/thumbnails/0/url")
        .map(str::to_string)
        .unwrap_or_else(|| VideoRecord::thumbnail_for(&video_id));

    let channel_title = non_empty_str(renderer, "/ownerText/runs/0/text")
        .or_else(|| non_empty_str(renderer, "/longBylineText/runs/0/text"))
        .unwrap_or(UNKNOWN_CHANNEL)
        .to_string();

    let duration = non_empty_str(renderer, "/lengthText/simpleText").map(str::to_string);

    Some(VideoRecord { video_id, title, thumbnail, channel_title, duration })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{page_with_data, search_data, search_page, video_renderer};
    use serde_json::json;

    fn extract(html: &str, max: usize) -> Vec<VideoRecord> {
        InitialDataStrategy::new().extract(html, max)
    }

    fn five_items() -> Vec<Value> {
        (1..=5)
            .map(|i| video_renderer(&format!("vid{i:08}"), &format!("Track {i}"), Some("Chan"), Some("2:00")))
            .collect()
    }

    #[test]
    fn test_extracts_in_document_order() {
        let records = extract(&search_page(&five_items()), 20);
        assert_eq!(records.len(), 5);
        let ids: Vec<&str> = records.iter().map(|r| r.video_id.as_str()).collect();
        assert_eq!(ids, vec!["vid00000001", "vid00000002", "vid00000003", "vid00000004", "vid00000005"]);
    }

    #[test]
    fn test_stops_at_max_results() {
        let records = extract(&search_page(&five_items()), 3);
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].video_id, "vid00000003");
    }

    #[test]
    fn test_full_fields() {
        let records = extract(&search_page(&five_items()), 1);
        let r = &records[0];
        assert_eq!(r.title, "Track 1");
        assert_eq!(r.channel_title, "Chan");
        assert_eq!(r.duration.as_deref(), Some("2:00"));
        assert_eq!(r.thumbnail, "https://i.ytimg.com/vi/vid00000001/hqdefault.jpg");
    }

    #[test]
    fn test_field_fallbacks() {
        let items = vec![
            json!({"videoRenderer": {
                "videoId": "simple0001",
                "title": {"simpleText": "Simple Title"},
                "longBylineText": {"runs": [{"text": "Byline Channel"}]}
            }}),
            json!({"videoRenderer": {"videoId": "bare000001"}}),
        ];
        let records = extract(&search_page(&items), 10);
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].title, "Simple Title");
        assert_eq!(records[0].channel_title, "Byline Channel");
        assert_eq!(records[0].thumbnail, "https://img.youtube.com/vi/simple0001/mqdefault.jpg");
        assert!(records[0].duration.is_none());

        assert_eq!(records[1].title, UNKNOWN_TITLE);
        assert_eq!(records[1].channel_title, UNKNOWN_CHANNEL);
    }

    #[test]
    fn test_skips_non_video_items() {
        let items = vec![
            json!({"channelRenderer": {"channelId": "UC123", "title": {"simpleText": "A channel"}}}),
            json!({"shelfRenderer": {"title": {"simpleText": "Shelf"}}}),
            video_renderer("only000001", "Only", Some("Chan"), None),
            json!({"videoRenderer": {"title": {"runs": [{"text": "No id"}]}}}),
        ];
        let records = extract(&search_page(&items), 10);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].video_id, "only000001");
    }

    #[test]
    fn test_walks_every_item_section() {
        let data = json!({"contents": {"twoColumnSearchResultsRenderer": {"primaryContents": {"sectionListRenderer": {
            "contents": [
                {"itemSectionRenderer": {"contents": [video_renderer("sect000001", "One", None, None)]}},
                {"continuationItemRenderer": {}},
                {"itemSectionRenderer": {"contents": [video_renderer("sect000002", "Two", None, None)]}}
            ]
        }}}}});
        let records = extract(&page_with_data(&data), 10);
        let ids: Vec<&str> = records.iter().map(|r| r.video_id.as_str()).collect();
        assert_eq!(ids, vec!["sect000001", "sect000002"]);
    }

    #[test]
    fn test_deduplicates_video_ids() {
        let items = vec![
            video_renderer("dupe000001", "First", None, None),
            video_renderer("dupe000001", "Again", None, None),
            video_renderer("uniq000001", "Other", None, None),
        ];
        let records = extract(&search_page(&items), 10);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "First");
        assert_eq!(records[1].video_id, "uniq000001");
    }

    #[test]
    fn test_title_with_terminator_sequence() {
        let items = vec![video_renderer("edge000001", "Weird }; title {", Some("Chan"), None)];
        let records = extract(&search_page(&items), 5);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Weird }; title {");
    }

    #[test]
    fn test_malformed_block_skipped() {
        let good = search_data(&[video_renderer("good000001", "Good", None, None)]);
        let html = format!(
            "<html><body><script>var ytInitialData = {{\"contents\": [1, 2,}};</script>\
             <script>var ytInitialData = {good};</script></body></html>"
        );
        let records = extract(&html, 5);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].video_id, "good000001");
    }

    #[test]
    fn test_unexpected_layout_skipped() {
        let odd = json!({"contents": {"singleColumnBrowseResultsRenderer": {}}});
        let good = search_data(&[video_renderer("good000002", "Good", None, None)]);
        let html = format!(
            "<html><body><script>var ytInitialData = {odd};</script>\
             <script>var ytInitialData = {good};</script></body></html>"
        );
        let records = extract(&html, 5);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].video_id, "good000002");
    }

    #[test]
    fn test_limit_spans_blocks() {
        let first = search_data(&five_items()[..2]);
        let second = search_data(&[video_renderer("next000001", "Next", None, None)]);
        let html = format!(
            "<html><body><script>var ytInitialData = {first};</script>\
             <script>var ytInitialData = {second};</script></body></html>"
        );
        assert_eq!(extract(&html, 3).len(), 3);
        assert_eq!(extract(&html, 2).len(), 2);
    }

    #[test]
    fn test_window_assignment_marker() {
        let data = search_data(&[video_renderer("wind000001", "Windowed", None, None)]);
        let html = format!("<html><body><script>window[\"ytInitialData\"] = {data};</script></body></html>");
        let records = extract(&html, 5);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].video_id, "wind000001");
    }

    #[test]
    fn test_no_state_block() {
        let html = "<html><body><script>var ytcfg = {\"a\": 1};</script></body></html>";
        assert!(extract(html, 5).is_empty());
    }
}
