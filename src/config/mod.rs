mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use std::str::FromStr;
use tracing::debug;

pub const ENV_CONFIG_PATH: &str = "CONFIG_PATH";
pub const ENV_API_URL: &str = "LLM_API_URL";
pub const ENV_API_USER: &str = "LLM_API_USER";
pub const ENV_API_PASS: &str = "LLM_API_PASS";
pub const ENV_API_TIMEOUT: &str = "LLM_API_TIMEOUT";
pub const ENV_SERVER_HOST: &str = "SERVER_HOST";
pub const ENV_SERVER_PORT: &str = "SERVER_PORT";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";

/// Loads configuration from the process environment, layered over the
/// optional YAML file named by `CONFIG_PATH`.
pub async fn load() -> Result<Config> {
    load_from(|key| env::var(key).ok()).await
}

/// Same as [`load`], with an explicit variable lookup.
pub async fn load_from<F>(lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match lookup(ENV_CONFIG_PATH) {
        Some(path) => {
            debug!("Loading configuration from: {}", path);
            let config_str = tokio::fs::read_to_string(&path).await?;
            serde_yaml::from_str(&config_str)?
        }
        None => Config::default(),
    };

    apply_env(&mut config, &lookup)?;
    validate(&config)?;

    Ok(config)
}

fn apply_env<F>(config: &mut Config, lookup: &F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_API_URL) {
        config.llm.api_url = url;
    }
    if let Some(user) = lookup(ENV_API_USER) {
        config.llm.api_user = user;
    }
    if let Some(pass) = lookup(ENV_API_PASS) {
        config.llm.api_pass = pass;
    }
    if let Some(timeout) = lookup(ENV_API_TIMEOUT) {
        config.llm.timeout_secs = parse_var(ENV_API_TIMEOUT, &timeout)?;
    }
    if let Some(host) = lookup(ENV_SERVER_HOST) {
        config.server.host = host;
    }
    if let Some(port) = lookup(ENV_SERVER_PORT) {
        config.server.port = parse_var(ENV_SERVER_PORT, &port)?;
    }
    if let Some(level) = lookup(ENV_LOG_LEVEL) {
        config.server.logs.level = level;
    }
    Ok(())
}

fn parse_var<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::config(format!("{} must be an integer, got '{}'", name, value)))
}

fn validate(config: &Config) -> Result<()> {
    if config.llm.api_url.trim().is_empty() {
        return Err(Error::config(format!("{} is not set", ENV_API_URL)));
    }
    if config.llm.timeout_secs == 0 {
        return Err(Error::config(format!(
            "{} must be greater than zero",
            ENV_API_TIMEOUT
        )));
    }
    Ok(())
}
