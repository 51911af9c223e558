//! `fivewh serve`: run the HTTP API.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{error, info};

use fivewh::analysis::AnalysisClient;
use fivewh::api::{start_server, AppState};
use fivewh::cache::ResultCache;
use fivewh::config::Config;

/// Start the server. A missing API key aborts before any traffic is served.
pub(crate) async fn cmd_serve(
    mut config: Config,
    bind: Option<String>,
    port: Option<u16>,
    static_dir: Option<PathBuf>,
) -> Result<()> {
    if let Some(bind) = bind {
        config.server.bind = bind;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(dir) = static_dir {
        config.server.static_dir = dir;
    }

    info!("Starting 5W1H analysis API v{}", env!("CARGO_PKG_VERSION"));

    let analyzer = AnalysisClient::from_config(&config.gemini).map_err(|e| {
        error!("Failed to initialize Gemini service: {}", e);
        anyhow::Error::new(e)
    })?;
    let cache = ResultCache::in_memory(&config.cache);
    info!(
        ttl_secs = config.cache.ttl_secs,
        max_entries = config.cache.max_entries,
        "Result cache ready"
    );

    start_server(&config.server, AppState::new(cache, analyzer))
        .await
        .map_err(|e| anyhow::anyhow!(e))
        .context("API server failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serve_without_api_key_fails_before_binding() {
        let mut config = Config::default();
        config.gemini.api_key = None;
        let err = cmd_serve(config, Some("127.0.0.1".into()), Some(0), None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[tokio::test]
    async fn test_serve_reports_bind_failure() {
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = taken.local_addr().unwrap().port();
        let mut config = Config::default();
        config.gemini.api_key = Some("test-key".into());
        let err = cmd_serve(config, Some("127.0.0.1".into()), Some(port), None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("API server failed"));
    }
}
