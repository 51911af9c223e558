//! Key-value cache backends with TTL expiry.
//!
//! [`CacheBackend`] is the seam the result cache talks to. Any store that
//! can get/set/delete/clear string values by key and expire them after a
//! fixed TTL is substitutable. [`MemoryBackend`] is the in-process default:
//! a concurrent map with TTL expiry and LRU eviction at capacity.

use async_trait::async_trait;
use dashmap::DashMap;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::error::Result;

/// A TTL-bounded string store.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Value for `key`, or `None` on miss or expiry.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any existing entry.
    async fn set(&self, key: String, value: String) -> Result<()>;

    /// Remove `key`. Returns `true` if a live entry was removed.
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Remove every entry.
    async fn clear(&self) -> Result<()>;
}

#[derive(Debug, Clone)]
struct MemoryEntry {
    value: String,
    created_at: Instant,
    accessed_at: Instant,
}

/// In-memory backend with TTL expiry and LRU eviction.
///
/// Expired entries are dropped lazily on read and swept on every insert.
/// Nothing survives a process restart.
#[derive(Debug)]
pub struct MemoryBackend {
    entries: DashMap<String, MemoryEntry>,
    ttl: Duration,
    max_entries: usize,
}

impl MemoryBackend {
    /// `max_entries` is clamped to a minimum of 1.
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            max_entries: max_entries.max(1),
        }
    }

    /// Number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_expired(&self, entry: &MemoryEntry) -> bool {
        entry.created_at.elapsed() >= self.ttl
    }

    fn evict_expired(&self) {
        self.entries.retain(|_, e| e.created_at.elapsed() < self.ttl);
    }

    fn evict_lru(&self) {
        let lru_key = self
            .entries
            .iter()
            .min_by_key(|e| e.value().accessed_at)
            .map(|e| e.key().clone());
        if let Some(key) = lru_key {
            debug!(key = %key_prefix(&key), "Evicting LRU cache entry");
            self.entries.remove(&key);
        }
    }
}

/// Short key prefix for log lines.
fn key_prefix(key: &str) -> &str {
    key.get(..8).unwrap_or(key)
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        if let Some(mut entry) = self.entries.get_mut(key) {
            if !self.is_expired(&entry) {
                entry.accessed_at = Instant::now();
                return Ok(Some(entry.value.clone()));
            }
        }
        // Guard released above; removing under it would deadlock the shard.
        if self.entries.remove_if(key, |_, e| self.is_expired(e)).is_some() {
            debug!(key = %key_prefix(key), "Cache entry expired, removing");
        }
        Ok(None)
    }

    async fn set(&self, key: String, value: String) -> Result<()> {
        self.evict_expired();
        if !self.entries.contains_key(&key) {
            while self.entries.len() >= self.max_entries {
                self.evict_lru();
            }
        }
        let now = Instant::now();
        self.entries.insert(
            key,
            MemoryEntry {
                value,
                created_at: now,
                accessed_at: now,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self
            .entries
            .remove(key)
            .map(|(_, e)| !self.is_expired(&e))
            .unwrap_or(false))
    }

    async fn clear(&self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }
}
