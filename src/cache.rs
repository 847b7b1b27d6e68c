use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;
use tracing::debug;

use crate::config::InsightConfig;
use crate::constants::cache::DEFAULT_MAX_ENTRIES;
use crate::errors::InsightError;
use crate::hash::{stable_hash_str, table_content_hash};
use crate::insights::InsightReport;
use crate::source::RawTable;
use crate::types::CacheKey;

/// Cached report plus the time it was stored.
#[derive(Clone, Debug, PartialEq)]
pub struct CachedReport {
    /// Report produced by the run.
    pub report: InsightReport,
    /// When the report was stored.
    pub inserted_at: DateTime<Utc>,
}

/// Caller-owned cache of insight reports keyed by input content.
///
/// Entries are evicted oldest-first once `max_entries` is reached. Expiry is
/// left to the caller via [`InsightCache::evict_older_than`].
#[derive(Clone, Debug)]
pub struct InsightCache {
    entries: IndexMap<CacheKey, CachedReport>,
    max_entries: usize,
}

impl Default for InsightCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}

impl InsightCache {
    /// Create a cache holding at most `max_entries` reports (minimum 1).
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: IndexMap::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Key for a table snapshot under `config`.
    pub fn key_for(tables: &[RawTable], config: &InsightConfig) -> Result<CacheKey, InsightError> {
        let config_json = serde_json::to_string(config)?;
        Ok(stable_hash_str(table_content_hash(0, tables), &config_json))
    }

    /// Cached report for `key`, if present.
    pub fn get(&self, key: CacheKey) -> Option<&CachedReport> {
        self.entries.get(&key)
    }

    /// Store `report`, replacing any entry under `key`.
    pub fn insert(&mut self, key: CacheKey, report: InsightReport) {
        self.insert_at(key, report, Utc::now());
    }

    pub(crate) fn insert_at(&mut self, key: CacheKey, report: InsightReport, at: DateTime<Utc>) {
        self.entries.shift_remove(&key);
        while self.entries.len() >= self.max_entries {
            if let Some((evicted, _)) = self.entries.shift_remove_index(0) {
                debug!("[trendmine:cache] evicted report {:016x}", evicted);
            }
        }
        self.entries.insert(
            key,
            CachedReport {
                report,
                inserted_at: at,
            },
        );
    }

    /// Drop the entry for `key`, returning it.
    pub fn remove(&mut self, key: CacheKey) -> Option<CachedReport> {
        self.entries.shift_remove(&key)
    }

    /// Drop entries stored more than `max_age` ago; returns how many went.
    pub fn evict_older_than(&mut self, max_age: Duration) -> usize {
        let cutoff = Utc::now() - max_age;
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.inserted_at >= cutoff);
        before - self.entries.len()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached reports.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no reports.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries kept before the oldest is evicted.
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }
}
