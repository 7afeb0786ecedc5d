//! Scrape orchestration: fetch one results page and extract records from it.

use std::time::Instant;
use vidscout_core::VideoRecord;

use crate::extract::Extractor;
use crate::fetch::{DocumentSource, FetchError};

/// Smallest accepted result limit.
pub const MIN_RESULTS: usize = 1;

/// Largest accepted result limit.
pub const MAX_RESULTS: usize = 20;

/// Clamp a result limit to `MIN_RESULTS..=MAX_RESULTS`.
pub fn clamp_max_results(max_results: usize) -> usize {
    max_results.clamp(MIN_RESULTS, MAX_RESULTS)
}

/// Fetches a results page and runs the extractor over it.
///
/// Holds no per-search state, so one instance serves concurrent searches.
/// Concurrent searches for the same query each fetch independently.
#[derive(Debug)]
pub struct Scraper<S> {
    source: S,
    extractor: Extractor,
}

impl<S: DocumentSource> Scraper<S> {
    /// Create a scraper with the default extraction strategies.
    pub fn new(source: S) -> Self {
        Self::with_extractor(source, Extractor::default())
    }

    pub fn with_extractor(source: S, extractor: Extractor) -> Self {
        Self { source, extractor }
    }

    /// Fetch and extract up to `max_results` records for `query`.
    ///
    /// `Err` means no document could be fetched; `Ok` with an empty list means
    /// the page was fetched but nothing matched.
    pub async fn search(&self, query: &str, max_results: usize) -> Result<Vec<VideoRecord>, FetchError> {
        let limit = clamp_max_results(max_results);
        let start = Instant::now();

        let html = match self.source.fetch_document(query, limit).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(query, error = %e, "search page fetch failed");
                return Err(e);
            }
        };

        let records = self.extractor.extract(&html, limit);

        tracing::debug!(
            query,
            limit,
            count = records.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "scrape completed"
        );

        Ok(records)
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
