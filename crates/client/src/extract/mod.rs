//! Video result extraction from search result pages.
//!
//! ### Strategies
//! - [`InitialDataStrategy`] decodes the page's embedded initial-state JSON and
//!   walks the search result sections. This is the primary path.
//! - [`PatternStrategy`] scans the raw text with regular expressions and zips
//!   ids, titles and channels by position. Best-effort degraded mode only.
//!
//! ### Selection
//! - [`Extractor`] tries its strategies in a fixed order and returns the first
//!   non-empty result.
//! - Extraction never fails: malformed input degrades toward fewer records.

pub mod initial_data;
pub mod json_scan;
pub mod pattern;

pub use initial_data::InitialDataStrategy;
pub use pattern::PatternStrategy;

use vidscout_core::VideoRecord;

/// Why a single embedded state block could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionParseError {
    /// Marker found but no complete JSON object follows it.
    #[error("unterminated JSON object after marker")]
    Unterminated,

    /// The embedded text is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The decoded document lacks an expected container.
    #[error("missing container: {0}")]
    MissingPath(&'static str),
}

/// One way of turning a document into video records.
pub trait ExtractionStrategy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Extract at most `max_results` records in document order.
    fn extract(&self, html: &str, max_results: usize) -> Vec<VideoRecord>;
}

/// Ordered list of strategies; the first non-empty output wins.
pub struct Extractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl Extractor {
    pub fn new(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { strategies }
    }

    /// Names of the configured strategies, in the order they are tried.
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Run the strategies in order until one yields records.
    pub fn extract(&self, html: &str, max_results: usize) -> Vec<VideoRecord> {
        if max_results == 0 {
            return Vec::new();
        }

        for strategy in &self.strategies {
            let mut records = strategy.extract(html, max_results);
            if !records.is_empty() {
                records.truncate(max_results);
                tracing::debug!(strategy = strategy.name(), count = records.len(), "extracted video records");
                return records;
            }
            tracing::debug!(strategy = strategy.name(), "strategy yielded no records");
        }

        Vec::new()
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(vec![Box::new(InitialDataStrategy::new()), Box::new(PatternStrategy)])
    }
}

impl std::fmt::Debug for Extractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extractor").field("strategies", &self.strategy_names()).finish()
    }
}

/// Extract video records using the default strategy order.
pub fn extract_videos(html: &str, max_results: usize) -> Vec<VideoRecord> {
    Extractor::default().extract(html, max_results)
}
