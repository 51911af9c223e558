//! `fivewh analyze`: one-shot analysis printed to stdout.

use anyhow::{Context, Result};

use fivewh::analysis::{AnalysisClient, AnalysisRequest};
use fivewh::config::Config;

/// Analyze a single pair without the HTTP layer or cache.
pub(crate) async fn cmd_analyze(config: Config, profession: String, topic: String) -> Result<()> {
    let request = AnalysisRequest::new(profession, topic);
    request.validate()?;

    let analyzer = AnalysisClient::from_config(&config.gemini)?;
    let result = analyzer
        .analyze(&request.profession, &request.topic)
        .await
        .context("Analysis failed")?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
