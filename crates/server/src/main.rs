//! Workbench server binary.

use std::path::PathBuf;

use anyhow::Context;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use workbench_server::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_file = std::env::args_os().nth(1).map(PathBuf::from);
    let settings = Settings::load(config_file.as_deref()).context("failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&settings.log.filter))
                .context("invalid log filter")?,
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Workbench server v{}", env!("CARGO_PKG_VERSION"));

    workbench_server::run_server(settings).await?;

    Ok(())
}
