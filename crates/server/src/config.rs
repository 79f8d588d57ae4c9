use std::net::{AddrParseError, SocketAddr};
use thiserror::Error;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid BIND_ADDRESS `{value}`: {source}")]
    InvalidAddress {
        value: String,
        source: AddrParseError,
    },
}

/// Server settings, read from the environment (and `.env`, if present)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub bind_address: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let value = lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        let bind_address = value
            .parse()
            .map_err(|source| ConfigError::InvalidAddress { value, source })?;

        Ok(Self {
            database_url,
            bind_address,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_bind_address() {
        let config = config(&[("DATABASE_URL", "postgres://localhost/editions")]).unwrap();
        assert_eq!(config.database_url, "postgres://localhost/editions");
        assert_eq!(config.bind_address, "0.0.0.0:3000".parse().unwrap());
    }

    #[test]
    fn test_custom_bind_address() {
        let config = config(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("BIND_ADDRESS", "127.0.0.1:8080"),
        ])
        .unwrap();
        assert_eq!(config.bind_address.port(), 8080);
    }

    #[test]
    fn test_database_url_is_required() {
        assert!(matches!(config(&[]), Err(ConfigError::Missing("DATABASE_URL"))));
        assert!(matches!(
            config(&[("DATABASE_URL", "  ")]),
            Err(ConfigError::Missing("DATABASE_URL"))
        ));
    }

    #[test]
    fn test_invalid_bind_address() {
        let err = config(&[("DATABASE_URL", "sqlite::memory:"), ("BIND_ADDRESS", "nowhere")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAddress { .. }));
    }
}
