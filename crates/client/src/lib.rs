//! Client code for vidscout.
//!
//! This crate provides the search page fetcher, result extraction, the scrape
//! orchestrator, and the search service that ties them to the query cache.

pub mod extract;
pub mod fetch;
pub mod scrape;
pub mod service;

#[cfg(test)]
pub(crate) mod fixtures;

pub use extract::{
    ExtractionParseError, ExtractionStrategy, Extractor, InitialDataStrategy, PatternStrategy, extract_videos,
};
pub use fetch::{DocumentSource, FetchConfig, FetchError, HttpFetcher};
pub use scrape::{MAX_RESULTS, MIN_RESULTS, Scraper, clamp_max_results};
pub use service::{
    DEFAULT_MAX_RESULTS, MaxResults, NotFoundResponse, SearchOutcome, SearchResponse, SearchService,
    ServiceErrorResponse,
};
