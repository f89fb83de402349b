use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use tudien_config::Config;
use tudien_http::HttpDictionary;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::new();
    let service = HttpDictionary::new(&config.service).context("Invalid dictionary service URL")?;

    tudien_server::serve(&config.server.bind_addr, Arc::new(service))
        .await
        .context("Proxy server failed")
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
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
