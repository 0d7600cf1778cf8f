use anyhow::Result;
use llm_relay::{config, handler::Handler, lambda, server};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let log_level = config.server.logs.level.clone();
    if let Err(e) = validate_log_level(&log_level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    // RUST_LOG directives take precedence over the configured level
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .init();

    info!("Starting llm-relay with log level: {}", log_level);
    info!(
        "Inference endpoint: {} (timeout={}s, basic_auth={})",
        config.llm.api_url,
        config.llm.timeout_secs,
        config.llm.basic_auth().is_some()
    );

    let handler = Handler::from_config(&config.llm)?;

    if lambda::is_lambda_environment() {
        lambda::run(handler).await?;
    } else {
        server::run(&config.server, handler).await?;
    }

    Ok(())
}
