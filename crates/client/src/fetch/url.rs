//! Search URL construction.

use url::Url;

/// Query parameter the results page reads the search terms from.
pub const QUERY_PARAM: &str = "search_query";

/// Error type for search URL failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Build the results page URL for `query`.
///
/// The base is trimmed and must be http(s). Its fragment is dropped, any query
/// string it already carries is kept, and the search terms are appended
/// form-urlencoded.
pub fn build_search_url(base: &str, query: &str) -> Result<Url, UrlError> {
    let trimmed = base.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let mut url = Url::parse(trimmed).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }

    url.set_fragment(None);
    url.query_pairs_mut().append_pair(QUERY_PARAM, query);

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_basic() {
        let url = build_search_url("https://www.youtube.com/results", "lofi beats").unwrap();
        assert_eq!(url.as_str(), "https://www.youtube.com/results?search_query=lofi+beats");
    }

    #[test]
    fn test_build_encodes_reserved_characters() {
        let url = build_search_url("https://www.youtube.com/results", "AC/DC & friends #1").unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, vec![("search_query".to_string(), "AC/DC & friends #1".to_string())]);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_build_keeps_existing_query() {
        let url = build_search_url("https://www.youtube.com/results?sp=EgIQAQ%3D%3D", "x").unwrap();
        assert_eq!(url.query(), Some("sp=EgIQAQ%3D%3D&search_query=x"));
    }

    #[test]
    fn test_build_trims_and_drops_fragment() {
        let url = build_search_url("  https://example.com/results#top  ", "q").unwrap();
        assert_eq!(url.as_str(), "https://example.com/results?search_query=q");
    }

    #[test]
    fn test_build_empty_base() {
        assert!(matches!(build_search_url("   ", "q"), Err(UrlError::Empty)));
    }

    #[test]
    fn test_build_unsupported_scheme() {
        let result = build_search_url("file:///etc/passwd", "q");
        assert!(matches!(result, Err(UrlError::UnsupportedScheme(_))));
    }

    #[test]
    fn test_build_invalid() {
        assert!(matches!(build_search_url("not a url", "q"), Err(UrlError::InvalidUrl(_))));
    }
}
