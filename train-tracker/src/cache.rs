//! Caching layer for announcement fetches.
//!
//! A short TTL keeps repeated fetches for the same train from hammering
//! the upstream API: several consumers polling the same train within the
//! TTL window share one response. Route assembly is still recomputed
//! from scratch on every poll; only the raw fetch is cached.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use moka::future::Cache as MokaCache;

use crate::domain::{AnnouncementEvent, TrainId};
use crate::trafikverket::{AnnouncementSource, ApiError};

/// Cache key: one entry per (train, scheduled departure date).
type FetchKey = (TrainId, NaiveDate);

/// Cached announcement list.
type FetchEntry = Arc<Vec<AnnouncementEvent>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(15),
            max_capacity: 100,
        }
    }
}

/// Announcement source with caching.
///
/// Wraps any [`AnnouncementSource`] and caches its responses; implements
/// the trait itself so it can stand wherever the wrapped source could.
pub struct CachedClient<S> {
    source: S,
    fetches: MokaCache<FetchKey, FetchEntry>,
}

impl<S: AnnouncementSource> CachedClient<S> {
    /// Create a new cached client around `source`.
    pub fn new(source: S, config: &CacheConfig) -> Self {
        let fetches = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { source, fetches }
    }

    /// Fetch announcements, using the cache if a fresh entry exists.
    pub async fn announcements(
        &self,
        train: &TrainId,
        date: NaiveDate,
    ) -> Result<FetchEntry, ApiError> {
        let key = (train.clone(), date);

        if let Some(cached) = self.fetches.get(&key).await {
            return Ok(cached);
        }

        let entry = self.source.announcements(train, date).await?;

        self.fetches.insert(key, entry.clone()).await;

        Ok(entry)
    }

    /// Access the underlying source for operations that bypass the cache.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Number of cached entries (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.fetches.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.fetches.invalidate_all();
    }
}

impl<S: AnnouncementSource> AnnouncementSource for CachedClient<S> {
    fn announcements(
        &self,
        train: &TrainId,
        date: NaiveDate,
    ) -> impl Future<Output = Result<FetchEntry, ApiError>> + Send {
        CachedClient::announcements(self, train, date)
    }
}
