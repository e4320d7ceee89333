use anyhow::Context;
use clap::Parser;
use gt_audio::{router, AppState, AudioConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    gt_audio::init_tracing();
    let config = AudioConfig::parse();
    let state = AppState::from_config(&config)?;

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?;
    info!(
        address = %format!("{}:{}", config.host, config.port),
        audio_dir = %config.audio_dir.display(),
        "audio service listening"
    );
    axum::serve(listener, router(state)).await?;
    Ok(())
}
