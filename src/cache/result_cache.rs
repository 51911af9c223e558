//! Analysis result cache keyed by normalized (profession, topic).

use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::analysis::AnalysisResult;
use crate::config::CacheConfig;
use crate::error::Result;

use super::backend::{CacheBackend, MemoryBackend};
use super::key::cache_key;

/// Stores [`AnalysisResult`]s as JSON in a [`CacheBackend`].
#[derive(Clone)]
pub struct ResultCache {
    backend: Arc<dyn CacheBackend>,
}

impl ResultCache {
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self { backend }
    }

    /// In-memory cache sized from config.
    pub fn in_memory(config: &CacheConfig) -> Self {
        Self::new(Arc::new(MemoryBackend::new(
            Duration::from_secs(config.ttl_secs),
            config.max_entries,
        )))
    }

    /// Cached result for the pair, or `None` on miss or expiry.
    ///
    /// An entry that no longer deserializes is dropped and reported as a miss.
    pub async fn get(&self, profession: &str, topic: &str) -> Result<Option<AnalysisResult>> {
        let key = cache_key(profession, topic);
        let Some(raw) = self.backend.get(&key).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(result) => Ok(Some(result)),
            Err(e) => {
                warn!(key = %key, "Cached analysis is corrupt, discarding: {}", e);
                self.backend.delete(&key).await?;
                Ok(None)
            }
        }
    }

    pub async fn set(&self, profession: &str, topic: &str, result: &AnalysisResult) -> Result<()> {
        let value = serde_json::to_string(result)?;
        self.backend.set(cache_key(profession, topic), value).await
    }

    /// Returns `true` if an entry existed and was removed.
    pub async fn delete(&self, profession: &str, topic: &str) -> Result<bool> {
        self.backend.delete(&cache_key(profession, topic)).await
    }

    pub async fn clear_all(&self) -> Result<()> {
        self.backend.clear().await
    }
}
