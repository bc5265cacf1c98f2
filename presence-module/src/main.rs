// People detector - polls a presence sensor over replayed detections

use clap::Parser;
use presence_module::{run, ModuleSettings};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "people-detector")]
#[command(about = "Person-presence sensor backed by a vision detection service")]
struct Cli {
    /// Settings file (TOML, JSON or YAML)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Stop after this many readings
    #[arg(long)]
    count: Option<u64>,

    /// Override the polling interval in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Readings go to stdout, logs to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut settings = ModuleSettings::load(cli.config.as_deref())?;
    if let Some(interval_ms) = cli.interval_ms {
        settings.poll_interval_ms = interval_ms;
        settings.validate()?;
    }

    info!(
        "Starting people detector '{}' ({}) every {:?}",
        settings.sensor.name,
        settings.sensor.model,
        settings.poll_interval()
    );

    run(&settings, cli.count, shutdown_signal(), |record| {
        match serde_json::to_string(&record) {
            Ok(line) => println!("{}", line),
            Err(e) => warn!("Failed to encode reading: {}", e),
        }
    })
    .await?;

    Ok(())
}
