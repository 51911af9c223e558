//! Process configuration.
//!
//! Values come from the environment (optionally seeded from a `.env` file via
//! `dotenvy`). Every field has a default except the Gemini API key, which the
//! server refuses to start without.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{FivewhError, Result};

/// Default Gemini model used for analysis.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Gemini provider settings.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    /// HTTP client timeout for a single `generateContent` call.
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: 120,
        }
    }
}

impl GeminiConfig {
    /// The API key, or a configuration error when none was provided.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                FivewhError::Config("GEMINI_API_KEY environment variable is required".into())
            })
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Result cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Seconds an analysis stays cached.
    pub ttl_secs: u64,
    /// Capacity of the in-memory store before LRU eviction kicks in.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 3600,
            max_entries: 1000,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    /// Directory holding the front-end bundle served under `/app/`.
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8000,
            static_dir: PathBuf::from("frontend"),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gemini: GeminiConfig,
    pub cache: CacheConfig,
    pub server: ServerConfig,
}

impl Config {
    /// Load `.env` (if any) and build the config from process environment.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        config.gemini.api_key = get("GEMINI_API_KEY").or_else(|| get("GOOGLE_API_KEY"));
        if let Some(model) = get("GEMINI_MODEL") {
            config.gemini.model = model;
        }
        if let Some(raw) = get("GEMINI_TIMEOUT_SECS") {
            config.gemini.timeout_secs = parse_var("GEMINI_TIMEOUT_SECS", &raw)?;
        }
        if let Some(raw) = get("CACHE_TTL_SECONDS") {
            config.cache.ttl_secs = parse_var("CACHE_TTL_SECONDS", &raw)?;
        }
        if let Some(raw) = get("CACHE_MAX_ENTRIES") {
            config.cache.max_entries = parse_var("CACHE_MAX_ENTRIES", &raw)?;
        }
        if let Some(bind) = get("FIVEWH_BIND") {
            config.server.bind = bind;
        }
        if let Some(raw) = get("FIVEWH_PORT") {
            config.server.port = parse_var("FIVEWH_PORT", &raw)?;
        }
        if let Some(dir) = get("FIVEWH_STATIC_DIR") {
            config.server.static_dir = PathBuf::from(dir);
        }

        Ok(config)
    }
}

fn parse_var<T: FromStr>(name: &str, raw: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| FivewhError::Config(format!("invalid value for {name} ('{raw}'): {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::from_lookup(lookup(&[])).unwrap();
        assert!(cfg.gemini.api_key.is_none());
        assert_eq!(cfg.gemini.model, DEFAULT_MODEL);
        assert_eq!(cfg.gemini.timeout_secs, 120);
        assert_eq!(cfg.cache.ttl_secs, 3600);
        assert_eq!(cfg.cache.max_entries, 1000);
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.server.static_dir, PathBuf::from("frontend"));
    }

    #[test]
    fn test_overrides() {
        let cfg = Config::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k"),
            ("CACHE_TTL_SECONDS", "60"),
            ("FIVEWH_PORT", "9000"),
            ("GEMINI_MODEL", "gemini-2.5-pro"),
        ]))
        .unwrap();
        assert_eq!(cfg.gemini.require_api_key().unwrap(), "k");
        assert_eq!(cfg.cache.ttl_secs, 60);
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.gemini.model, "gemini-2.5-pro");
    }

    #[test]
    fn test_google_api_key_fallback() {
        let cfg = Config::from_lookup(lookup(&[("GOOGLE_API_KEY", "g")])).unwrap();
        assert_eq!(cfg.gemini.api_key.as_deref(), Some("g"));
    }

    #[test]
    fn test_empty_key_is_unset() {
        let cfg = Config::from_lookup(lookup(&[("GEMINI_API_KEY", "  ")])).unwrap();
        assert!(matches!(
            cfg.gemini.require_api_key(),
            Err(FivewhError::Config(_))
        ));
    }

    #[test]
    fn test_bad_ttl_rejected() {
        let err = Config::from_lookup(lookup(&[("CACHE_TTL_SECONDS", "soon")])).unwrap_err();
        assert!(err.to_string().contains("CACHE_TTL_SECONDS"));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let cfg = Config::from_lookup(lookup(&[("GEMINI_API_KEY", "secret-key")])).unwrap();
        let dbg = format!("{:?}", cfg);
        assert!(!dbg.contains("secret-key"));
        assert!(dbg.contains("REDACTED"));
    }

    #[test]
    fn test_cache_config_deserialize_partial() {
        let cfg: CacheConfig = serde_json::from_str(r#"{"ttl_secs": 10}"#).unwrap();
        assert_eq!(cfg.ttl_secs, 10);
        assert_eq!(cfg.max_entries, 1000);
    }
}
