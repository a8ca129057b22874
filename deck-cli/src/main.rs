//! # Saorsa Deck
//!
//! Command-line export of captured editor selections.

use clap::Parser;
use deck_cli::{run, CliArgs, CliConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,deck_export=debug,deck_plugin=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    // Use JSON format when RUST_LOG_FORMAT=json
    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = CliConfig::from(CliArgs::parse());
    tracing::info!("Starting Saorsa Deck export");

    let notification = run(config).await?;
    if notification.is_error() {
        anyhow::bail!("{notification}");
    }
    Ok(())
}
