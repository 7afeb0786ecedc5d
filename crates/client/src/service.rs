//! Search service: input validation, scraping, and query cache population.
//!
//! Every call performs a fresh scrape; the query cache is written but never
//! consulted here. Outcomes map onto three caller-visible shapes:
//!
//! | Outcome    | Status | Body                                    |
//! |------------|--------|-----------------------------------------|
//! | `Found`    | 200    | `{ query, total, data, source }`        |
//! | `NotFound` | 404    | `{ message, query, data: [] }`          |
//! | `Failed`   | 500    | `{ message }` with a fixed, opaque text |

use serde::{Deserialize, Serialize};
use serde_json::Value;
use vidscout_core::error::SERVICE_UNAVAILABLE_MESSAGE;
use vidscout_core::{CacheDb, Error, VideoRecord};

use crate::fetch::DocumentSource;
use crate::scrape::{MAX_RESULTS, Scraper};

/// Limit applied when the caller's `max_results` is missing or unusable.
pub const DEFAULT_MAX_RESULTS: usize = 15;

/// Value of `source` in successful responses.
pub const SOURCE_SCRAPER: &str = "scraper";

const NOT_FOUND_MESSAGE: &str = "No videos found for this query";

/// Effective result limit parsed from loosely typed caller input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxResults(usize);

impl MaxResults {
    /// Parse with [`DEFAULT_MAX_RESULTS`] as the fallback.
    pub fn parse(raw: Option<&Value>) -> Self {
        Self::parse_or(raw, DEFAULT_MAX_RESULTS)
    }

    /// Accept a JSON number or a string with a leading integer.
    ///
    /// Missing, non-numeric, zero or negative input yields `default`; anything
    /// larger than [`MAX_RESULTS`] is clamped down to it.
    pub fn parse_or(raw: Option<&Value>, default: usize) -> Self {
        let parsed = match raw {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
            Some(Value::String(s)) => leading_integer(s),
            _ => None,
        };

        match parsed {
            Some(n) if n > 0 => Self(n.min(MAX_RESULTS as i64) as usize),
            _ => Self(default.clamp(1, MAX_RESULTS)),
        }
    }

    pub fn get(self) -> usize {
        self.0
    }
}

/// Integer prefix of `s` after leading whitespace, e.g. `"12abc"` → 12.
fn leading_integer(s: &str) -> Option<i64> {
    let trimmed = s.trim_start();
    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };

    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    if end == 0 {
        return None;
    }

    let magnitude = rest[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(sign * magnitude)
}

/// Successful search body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub total: usize,
    pub data: Vec<VideoRecord>,
    pub source: String,
}

/// Body returned when the page had no extractable videos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotFoundResponse {
    pub message: String,
    pub query: String,
    pub data: Vec<VideoRecord>,
}

/// Body returned when the upstream fetch failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceErrorResponse {
    pub message: String,
}

impl Default for ServiceErrorResponse {
    fn default() -> Self {
        Self { message: SERVICE_UNAVAILABLE_MESSAGE.to_string() }
    }
}

/// Result of one search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(SearchResponse),
    NotFound(NotFoundResponse),
    Failed(ServiceErrorResponse),
}

impl SearchOutcome {
    /// HTTP-style status for the outcome.
    pub fn status(&self) -> u16 {
        match self {
            SearchOutcome::Found(_) => 200,
            SearchOutcome::NotFound(_) => 404,
            SearchOutcome::Failed(_) => 500,
        }
    }

    /// JSON body for the outcome.
    pub fn body(&self) -> Result<Value, serde_json::Error> {
        match self {
            SearchOutcome::Found(r) => serde_json::to_value(r),
            SearchOutcome::NotFound(r) => serde_json::to_value(r),
            SearchOutcome::Failed(r) => serde_json::to_value(r),
        }
    }
}

/// Validates input, scrapes, and memoizes the first result per query.
pub struct SearchService<S> {
    scraper: Scraper<S>,
    cache: CacheDb,
    default_max_results: usize,
}

impl<S: DocumentSource> SearchService<S> {
    pub fn new(scraper: Scraper<S>, cache: CacheDb) -> Self {
        Self { scraper, cache, default_max_results: DEFAULT_MAX_RESULTS }
    }

    /// Override the limit used for missing or invalid `max_results`.
    pub fn with_default_max_results(mut self, default_max_results: usize) -> Self {
        self.default_max_results = default_max_results;
        self
    }

    pub fn cache(&self) -> &CacheDb {
        &self.cache
    }

    /// Run one search.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if `query` is empty or whitespace. Fetch
    /// failures are reported as [`SearchOutcome::Failed`], not as errors.
    pub async fn search(&self, query: &str, max_results: Option<&Value>) -> Result<SearchOutcome, Error> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::InvalidInput("query cannot be empty".into()));
        }

        let limit = MaxResults::parse_or(max_results, self.default_max_results).get();

        let records = match self.scraper.search(query, limit).await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(query, error = %e, "search failed");
                return Ok(SearchOutcome::Failed(ServiceErrorResponse::default()));
            }
        };

        let Some(first) = records.first() else {
            tracing::info!(query, "no videos found");
            return Ok(SearchOutcome::NotFound(NotFoundResponse {
                message: NOT_FOUND_MESSAGE.to_string(),
                query: query.to_string(),
                data: Vec::new(),
            }));
        };

        if let Err(e) = self.cache.write_query_result(query, first).await {
            tracing::warn!(query, error = %e, "failed to cache first search result");
        }

        Ok(SearchOutcome::Found(SearchResponse {
            query: query.to_string(),
            total: records.len(),
            data: records,
            source: SOURCE_SCRAPER.to_string(),
        }))
    }
}
