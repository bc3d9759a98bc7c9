use crate::error::ConfigError;
use std::net::SocketAddr;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, Fred, Server};

/// The default FRED observations endpoint.
pub const DEFAULT_FRED_BASE_URL: &str = "https://api.stlouisfed.org/fred/series/observations";

/// Loads the application configuration.
///
/// Layering, lowest priority first: built-in defaults, an optional
/// `config.toml` next to the binary, then `MACRODASH_*` environment
/// variables (e.g., `MACRODASH_SERVER__BIND`). The FRED API key is read
/// separately from the conventional `FRED_API_KEY` variable so existing FRED
/// tooling setups keep working.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .set_default("server.bind", "127.0.0.1:3000")?
        .set_default("fred.base_url", DEFAULT_FRED_BASE_URL)?
        .set_default("fred.observation_start", "2000-01-01")?
        // The config file is optional; the defaults above are a complete setup.
        .add_source(config::File::with_name("config.toml").required(false))
        .add_source(config::Environment::with_prefix("MACRODASH").separator("__"))
        .build()?;

    let mut config = builder.try_deserialize::<Config>()?;

    if config.fred.api_key.is_none() {
        config.fred.api_key = std::env::var("FRED_API_KEY").ok().filter(|k| !k.is_empty());
    }

    validate(&config)?;
    Ok(config)
}

/// Rejects settings that would only fail later, at bind time.
fn validate(config: &Config) -> Result<(), ConfigError> {
    config
        .server
        .bind
        .parse::<SocketAddr>()
        .map_err(|e| {
            ConfigError::ValidationError(format!(
                "server.bind '{}' is not a socket address: {}",
                config.server.bind, e
            ))
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn config_with_bind(bind: &str) -> Config {
        Config {
            server: Server {
                bind: bind.to_string(),
            },
            fred: Fred {
                base_url: DEFAULT_FRED_BASE_URL.to_string(),
                api_key: None,
                observation_start: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            },
        }
    }

    #[test]
    fn socket_address_bind_passes_validation() {
        assert!(validate(&config_with_bind("127.0.0.1:3000")).is_ok());
    }

    #[test]
    fn non_socket_bind_fails_validation() {
        let err = validate(&config_with_bind("not-an-address")).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
