use std::sync::Arc;

use phq_voice::adapters::{ConsoleDisplay, ConsoleSpeaker, SayCommand, StdinListener};
use phq_voice::config::Config;
use phq_voice::ports::SpeechOutput;
use phq_voice::{Driver, Error};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load()?;
    tracing::info!(?config, "PHQ-9 voice screener booting");

    let say = SayCommand::probe(&config.speech_command, config.voice.as_deref()).await;
    let speaker: Arc<dyn SpeechOutput> = if say.is_available() {
        Arc::new(say)
    } else {
        Arc::new(ConsoleSpeaker)
    };

    let driver = match Driver::new(
        speaker,
        Arc::new(StdinListener::new()),
        Arc::new(ConsoleDisplay),
        &config,
    ) {
        Ok(driver) => driver,
        // Already shown on the display; nothing can run.
        Err(Error::CapabilityUnavailable(_)) => return Ok(()),
        Err(e) => return Err(e.into()),
    };

    let shutdown = CancellationToken::new();
    let ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    println!("Answer each question by typing what you would say, then press Enter.");
    driver.trigger().start().await?;

    match driver.run(shutdown).await {
        Ok(controller) => {
            if let Some(assessment) = controller.assessment() {
                tracing::info!(report = %serde_json::to_string(assessment)?, "Final assessment");
            }
            tracing::debug!(telemetry = ?controller.telemetry.snapshot(), "Session telemetry");
            Ok(())
        }
        Err(Error::CapabilityUnavailable(reason)) => {
            tracing::warn!(%reason, "Session ended without speech input");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
