use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tudien_config::Config;
use tudien_core::MemoryLocation;
use tudien_http::HttpDictionary;

pub mod audio;
pub mod controller;
pub mod events;
pub mod io;
pub mod session;
pub mod state;
pub mod ui;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::session::SearchSession;
use self::state::AppState;

/// Vietnamese dictionary lookup
#[derive(Debug, Parser)]
#[command(name = "tudien", version)]
struct Cli {
    /// Page address to start from, e.g. "/?search=h%25E1%25BB%258Dc"
    #[arg(long, default_value = "/")]
    url: String,

    /// JSON profile; environment variables are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::new(),
    };
    tracing::debug!("Config: {:?}", config);

    let service = HttpDictionary::new(&config.service).context("Invalid dictionary service URL")?;
    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(state);

    let session = SearchSession::new(Arc::new(service), MemoryLocation::parse(&cli.url))
        .with_cancel(controller.cancel_token());

    let mut tasks = controller.spawn_tasks(session);

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::debug!("Task finished"),
                Ok(Err(e)) => tracing::error!("Task failed: {:#}", e),
                Err(e) => tracing::error!("Task panicked: {}", e),
            }
        }
    }

    controller.shutdown();

    let drain = async {
        while let Some(result) = tasks.join_next().await {
            if let Ok(Err(e)) = result {
                tracing::debug!("Task exited during shutdown: {:#}", e);
            }
        }
    };
    if tokio::time::timeout(Duration::from_secs(2), drain).await.is_err() {
        tracing::warn!("Tasks did not stop in time");
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .with_writer(std::io::stderr);

    if std::env::var("LOG_FORMAT").is_ok_and(|v| v == "json") {
        builder.json().init();
    } else {
        builder.init();
    }
}
