//! In-memory track detail cache with a fixed TTL.
//!
//! Values are stored as JSON so any serializable payload fits. Expired entries
//! are treated as absent on read and dropped by [`DetailCache::purge_expired`].

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tokio::task::JoinHandle;

/// Lifetime of a detail entry (15 minutes).
pub const DETAIL_TTL: Duration = Duration::from_secs(900);

struct DetailEntry {
    value: serde_json::Value,
    expires_at: Instant,
}

impl DetailEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Identifier-keyed cache for track detail payloads.
///
/// Cloning yields another handle to the same store.
#[derive(Clone)]
pub struct DetailCache {
    entries: Arc<RwLock<HashMap<String, DetailEntry>>>,
    ttl: Duration,
}

impl std::fmt::Debug for DetailCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailCache").field("ttl", &self.ttl).finish_non_exhaustive()
    }
}

impl Default for DetailCache {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailCache {
    /// Create a cache using [`DETAIL_TTL`].
    pub fn new() -> Self {
        Self::with_ttl(DETAIL_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self { entries: Arc::new(RwLock::new(HashMap::new())), ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Raw JSON for `key`, or None if missing or expired.
    pub async fn get_value(&self, key: &str) -> Option<serde_json::Value> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if entry.is_expired(Instant::now()) {
            tracing::debug!(key, "detail cache entry expired");
            return None;
        }
        Some(entry.value.clone())
    }

    /// Typed value for `key`.
    ///
    /// A stored payload that does not deserialize as `T` reads as absent.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.get_value(key).await?;
        match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(key, error = %e, "detail cache payload has unexpected shape");
                None
            }
        }
    }

    /// Store `value` under `key`; the TTL starts now.
    ///
    /// Fails only if `value` cannot be represented as JSON.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(value)?;
        let expires_at = Instant::now() + self.ttl;
        self.entries
            .write()
            .await
            .insert(key.to_string(), DetailEntry { value, expires_at });
        Ok(())
    }

    /// Read-through lookup.
    ///
    /// Returns the cached value when fresh; otherwise awaits `fetch`, caches a
    /// successful result and returns it. Errors from `fetch` are passed through
    /// and nothing is cached. Concurrent misses for one key each call `fetch`.
    pub async fn get_or_fetch<T, E, F, Fut>(&self, key: &str, fetch: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(hit) = self.get::<T>(key).await {
            tracing::debug!(key, "detail cache hit");
            return Ok(hit);
        }

        let value = fetch().await?;
        if let Err(e) = self.set(key, &value).await {
            tracing::warn!(key, error = %e, "failed to cache detail payload");
        }
        Ok(value)
    }

    /// Drop every expired entry, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Spawn a background task that purges expired entries every `interval`.
    ///
    /// The task runs until aborted or the runtime shuts down.
    pub fn spawn_sweeper(&self, interval: Duration) -> JoinHandle<()> {
        let cache = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = cache.purge_expired().await;
                if removed > 0 {
                    tracing::debug!(removed, "swept expired detail cache entries");
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TrackDetail {
        name: String,
        artist: String,
        plays: u64,
    }

    fn detail() -> TrackDetail {
        TrackDetail { name: "Believer".into(), artist: "Imagine Dragons".into(), plays: 42 }
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = DetailCache::new();
        cache.set("track:1", &detail()).await.unwrap();

        let got: TrackDetail = cache.get("track:1").await.unwrap();
        assert_eq!(got, detail());
        assert!(cache.get::<TrackDetail>("track:2").await.is_none());
    }

    #[tokio::test]
    async fn test_default_ttl() {
        assert_eq!(DetailCache::new().ttl(), Duration::from_secs(900));
    }

    #[tokio::test(start_paused = true)]
    async fn test_present_before_ttl() {
        let cache = DetailCache::new();
        cache.set("track:1", &detail()).await.unwrap();

        tokio::time::advance(Duration::from_secs(899)).await;
        assert!(cache.get_value("track:1").await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_absent_after_ttl() {
        let cache = DetailCache::new();
        cache.set("track:1", &detail()).await.unwrap();

        tokio::time::advance(Duration::from_secs(901)).await;
        assert!(cache.get_value("track:1").await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_overwrites_and_resets_ttl() {
        let cache = DetailCache::new();
        cache.set("k", &1).await.unwrap();
        tokio::time::advance(Duration::from_secs(600)).await;

        cache.set("k", &2).await.unwrap();
        tokio::time::advance(Duration::from_secs(600)).await;
        assert_eq!(cache.get::<i32>("k").await, Some(2));
    }

    #[tokio::test]
    async fn test_wrong_shape_reads_absent() {
        let cache = DetailCache::new();
        cache.set("k", "just a string").await.unwrap();
        assert!(cache.get::<TrackDetail>("k").await.is_none());
        assert_eq!(cache.get::<String>("k").await.as_deref(), Some("just a string"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_expired() {
        let cache = DetailCache::new();
        cache.set("old", &1).await.unwrap();
        tokio::time::advance(Duration::from_secs(1000)).await;
        cache.set("fresh", &2).await.unwrap();

        assert_eq!(cache.len().await, 2);
        assert_eq!(cache.purge_expired().await, 1);
        assert_eq!(cache.len().await, 1);
        assert!(cache.get_value("fresh").await.is_some());
    }

    #[tokio::test]
    async fn test_get_or_fetch_caches_success() {
        let cache = DetailCache::new();
        let first: Result<TrackDetail, String> = cache.get_or_fetch("track:1", || async { Ok(detail()) }).await;
        assert_eq!(first.unwrap(), detail());

        let second: Result<TrackDetail, String> =
            cache.get_or_fetch("track:1", || async { Err("should not be called".to_string()) }).await;
        assert_eq!(second.unwrap(), detail());
    }

    #[tokio::test]
    async fn test_get_or_fetch_does_not_cache_errors() {
        let cache = DetailCache::new();
        let result: Result<TrackDetail, String> =
            cache.get_or_fetch("track:1", || async { Err("upstream down".to_string()) }).await;
        assert_eq!(result.unwrap_err(), "upstream down");
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_clones_share_store() {
        let cache = DetailCache::new();
        let other = cache.clone();
        cache.set("k", &1).await.unwrap();
        assert_eq!(other.get::<i32>("k").await, Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_purges() {
        let cache = DetailCache::with_ttl(Duration::from_secs(5));
        cache.set("old", &1).await.unwrap();

        let handle = cache.spawn_sweeper(Duration::from_secs(1));
        tokio::time::sleep(Duration::from_millis(6500)).await;

        assert!(cache.is_empty().await);
        handle.abort();
    }
}
