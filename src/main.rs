//! http-echo: answers every HTTP request with the same text.
//!
//! Diagnostics go to stderr through `tracing`; access lines go to stdout.

use http_echo::config::Config;
use http_echo::echo::Echo;
use http_echo::middleware::{AccessLog, AppHeaders, LogSink};
use http_echo::Server;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!(
        listen = %config.listen,
        status = config.status.as_u16(),
        version = http_echo::APP_VERSION,
        "starting http-echo"
    );

    let app = AccessLog::new(
        LogSink::stdout(),
        AppHeaders::new(config.status, Echo::new(config.text)),
    );

    Server::bind(config.listen).await?.serve(app).await?;
    Ok(())
}
