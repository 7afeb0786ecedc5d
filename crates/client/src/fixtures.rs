//! HTML fixtures shaped like the platform's search results page.

use serde_json::{Value, json};

/// One `videoRenderer` item as it appears in `ytInitialData`.
pub fn video_renderer(id: &str, title: &str, channel: Option<&str>, duration: Option<&str>) -> Value {
    let mut renderer = json!({
        "videoId": id,
        "title": {"runs": [{"text": title}]},
        "thumbnail": {"thumbnails": [
            {"url": format!("https://i.ytimg.com/vi/{id}/hqdefault.jpg"), "width": 480, "height": 270}
        ]},
        "navigationEndpoint": {"watchEndpoint": {"videoId": id}}
    });
    if let Some(channel) = channel {
        renderer["ownerText"] = json!({"runs": [{"text": channel}]});
    }
    if let Some(duration) = duration {
        renderer["lengthText"] = json!({"simpleText": duration});
    }
    json!({ "videoRenderer": renderer })
}

/// `ytInitialData` holding one item section with `items`.
pub fn search_data(items: &[Value]) -> Value {
    json!({
        "responseContext": {"visitorData": "abc"},
        "contents": {"twoColumnSearchResultsRenderer": {"primaryContents": {"sectionListRenderer": {
            "contents": [{"itemSectionRenderer": {"contents": items}}]
        }}}}
    })
}

/// Full page embedding `data` the way the live site does.
pub fn page_with_data(data: &Value) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>results</title>\
         <script nonce=\"n1\">var ytcfg = {{\"INNERTUBE_API_KEY\": \"k\"}};</script></head>\
         <body><div id=\"content\"></div>\
         <script nonce=\"n2\">var ytInitialData = {data};</script>\
         <script nonce=\"n3\">if (window.ytcsi) {{ window.ytcsi.tick(\"pdr\", null, ''); }}</script>\
         </body></html>"
    )
}

pub fn search_page(items: &[Value]) -> String {
    page_with_data(&search_data(items))
}

/// Page whose initial data is truncated, leaving only regex-recoverable text.
pub fn fallback_page(entries: &[(&str, &str, Option<&str>)]) -> String {
    let mut body = String::new();
    for (id, title, channel) in entries {
        body.push_str(&format!(r#"{{"videoRenderer":{{"videoId":"{id}","title":{{"runs":[{{"text":"{title}"}}]}}"#));
        if let Some(channel) = channel {
            body.push_str(&format!(r#","ownerText":{{"runs":[{{"text":"{channel}"}}]}}"#));
        }
        body.push_str("},");
    }
    format!("<html><body><script>var ytInitialData = {{\"contents\":[{body}</script></body></html>")
}
