use anyhow::{anyhow, Result};
use challengedns::{Config, DnsServer, SharedConfig};
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_init();

    let mut first_args = std::env::args().take(2);
    let (program_name, config_file) = (
        first_args.next().unwrap_or("challengedns".to_string()),
        first_args.next(),
    );

    let config = config_init(&program_name, config_file)?;
    let dns_server = Arc::new(DnsServer::new(&config.dns_bind_addr)?);

    tracing::info!(
        "DNS challenges will be served on UDP {}",
        &config.dns_bind_addr
    );
    tracing::info!("API listening on {}", &config.api_bind_addr);
    let api_server = challengedns::new_http(config.clone(), dns_server.clone());
    let api_handle = tokio::spawn(api_server);

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("quitting from signal");
        },
        Ok(api_res) = api_handle => {
            if let Err(err) = api_res {
                return Err(err.into());
            }
        }
    }

    // Retract any record still live so the socket is released before exit.
    if dns_server.is_up() {
        if let Err(err) = dns_server.clean_up().await {
            tracing::warn!("failed to stop dns responder: {err}");
        }
    }
    tracing::info!("goodbye");
    Ok(())
}

fn tracing_init() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "challengedns=info".into()),
        )
        .init();
}

fn config_init(program_name: &str, config_file: Option<String>) -> Result<SharedConfig> {
    match config_file {
        None => Err(anyhow!("usage: {program_name} /path/to/config.json")),
        Some(config_file) => {
            tracing::debug!("loaded config from {config_file}");
            let config = Config::try_from_file(&config_file)?;
            Ok(Arc::new(config))
        }
    }
}
