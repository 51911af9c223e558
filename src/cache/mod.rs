//! Analysis result caching with TTL expiry and LRU eviction.

pub mod backend;
pub mod key;
pub mod result_cache;

pub use backend::{CacheBackend, MemoryBackend};
pub use key::cache_key;
pub use result_cache::ResultCache;
