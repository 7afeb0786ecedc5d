//! Query cache operations.
//!
//! Memoizes the first scraped result per normalized query. The table is keyed
//! by the normalized query, so a second write for the same query replaces the
//! first (last-write-wins).

use super::connection::CacheDb;
use crate::Error;
use crate::model::{QueryCacheEntry, VideoRecord, normalize_query};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

impl CacheDb {
    /// Insert or replace the cached first result for `query`.
    pub async fn write_query_result(&self, query: &str, record: &VideoRecord) -> Result<(), Error> {
        let key = normalize_query(query);
        if key.is_empty() {
            return Err(Error::InvalidInput("query cannot be empty".into()));
        }

        let record = record.clone();
        let created_at = timestamp(Utc::now());

        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO query_cache (query, youtube_id, title, thumbnail, channel_title, duration, created_at)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                    ON CONFLICT(query) DO UPDATE SET
                        youtube_id = excluded.youtube_id,
                        title = excluded.title,
                        thumbnail = excluded.thumbnail,
                        channel_title = excluded.channel_title,
                        duration = excluded.duration,
                        created_at = excluded.created_at",
                    params![
                        key,
                        record.video_id,
                        record.title,
                        record.thumbnail,
                        record.channel_title,
                        record.duration,
                        created_at
                    ],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Look up the cached first result for `query`.
    ///
    /// Returns None if the normalized query has never been written.
    pub async fn read_query_result(&self, query: &str) -> Result<Option<QueryCacheEntry>, Error> {
        let key = normalize_query(query);
        self.conn
            .call(move |conn| -> Result<Option<QueryCacheEntry>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT query, youtube_id, title, thumbnail, channel_title, duration, created_at
                    FROM query_cache WHERE query = ?1",
                )?;

                let result = stmt.query_row(params![key], |row| {
                    Ok(QueryCacheEntry {
                        query: row.get(0)?,
                        youtube_id: row.get(1)?,
                        title: row.get(2)?,
                        thumbnail: row.get(3)?,
                        channel_title: row.get(4)?,
                        duration: row.get(5)?,
                        created_at: row.get(6)?,
                    })
                });

                match result {
                    Ok(entry) => Ok(Some(entry)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Number of memoized queries.
    pub async fn count_query_results(&self) -> Result<u64, Error> {
        self.conn
            .call(|conn| -> Result<u64, Error> {
                let count: i64 = conn.query_row("SELECT COUNT(*) FROM query_cache", [], |row| row.get(0))?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }

    /// Delete entries written more than `days` days ago.
    ///
    /// Returns the number of deleted entries.
    pub async fn purge_query_results_older_than(&self, days: i64) -> Result<u64, Error> {
        if days < 0 {
            return Err(Error::InvalidInput("older_than_days must not be negative".into()));
        }

        // No stored row predates the earliest representable date.
        let cutoff = Duration::try_days(days)
            .and_then(|window| Utc::now().checked_sub_signed(window))
            .map(timestamp);
        let Some(cutoff) = cutoff else {
            return Ok(0);
        };

        self.conn
            .call(move |conn| -> Result<u64, Error> {
                let count = conn.execute("DELETE FROM query_cache WHERE created_at < ?1", params![cutoff])?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}

/// Fixed-width RFC 3339 so stored timestamps order correctly as text.
fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}
