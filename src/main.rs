use anyhow::{Context, Result};
use blob_quickstart::{
    config::AppConfig,
    prompt::{LinePrompter, NoPrompt},
    tutorial::{RunReport, Tutorial},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Narration owns stdout, logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::from_env_and_args()?;
    tracing::info!("Starting blob-quickstart with config: {:?}", config);

    let store = config
        .store_config()?
        .build()
        .await
        .with_context(|| format!("connecting to the {:?} backend", config.backend))?;

    let stdout = std::io::stdout();
    let report = if config.interactive {
        Tutorial::new(store, config.settings, stdout, LinePrompter::stdin())
            .run()
            .await?
    } else {
        Tutorial::new(store, config.settings, stdout, NoPrompt)
            .run()
            .await?
    };

    log_report(&report);
    Ok(())
}

fn log_report(report: &RunReport) {
    tracing::info!(
        container = %report.container,
        blob = %report.blob,
        listed = report.listed_blobs.len(),
        content_matches = report.content_matches,
        "quickstart finished"
    );
}
