use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::payments::providers::EbanxConfig;

const ENV_PREFIX: &str = "APP";
const CONFIG_FILE: &str = "ebanx";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub ebanx: EbanxConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
}

impl Config {
    /// Load configuration from defaults, an optional `ebanx.toml`, and
    /// `APP__`-prefixed environment variables, e.g. `APP__EBANX__INTEGRATION_KEY`.
    pub fn load() -> Result<Self> {
        let settings = ::config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080_i64)?
            .set_default("server.environment", "development")?
            .add_source(::config::File::with_name(CONFIG_FILE).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration sources")?;

        let config: Config = settings
            .try_deserialize()
            .context("Invalid configuration")?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port < 1024 {
            return Err(anyhow!(
                "Port must be at least 1024, got {}",
                self.server.port
            ));
        }

        let valid_environments = ["development", "staging", "production"];
        if !valid_environments.contains(&self.server.environment.as_str()) {
            return Err(anyhow!(
                "Environment must be one of: {:?}, got {}",
                valid_environments,
                self.server.environment
            ));
        }

        if self.server.environment == "production" && self.ebanx.test_mode {
            tracing::warn!("EBANX test mode is enabled in production");
        }

        self.ebanx.validate().context("Invalid EBANX configuration")?;

        Ok(())
    }
}
