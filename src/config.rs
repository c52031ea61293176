use std::env;
use thiserror::Error;

use crate::constants::{DEFAULT_BACKEND_CONNECT_TIMEOUT_SECS, DEFAULT_HOST_PORT};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a number, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

/// Runtime configuration, read from the environment (after `.env` is loaded)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub api_key: Option<String>,
    pub backend_url: Option<String>,
    pub connect_timeout_secs: u64,
}

fn parse_number<T: std::str::FromStr>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Ok(Self {
            port: parse_number("HOST_PORT", get("HOST_PORT"), DEFAULT_HOST_PORT)?,
            api_key: get("API_KEY").or_else(|| get("apikey")),
            backend_url: get("BACKEND_URL"),
            connect_timeout_secs: parse_number(
                "BACKEND_CONNECT_TIMEOUT_SECS",
                get("BACKEND_CONNECT_TIMEOUT_SECS"),
                DEFAULT_BACKEND_CONNECT_TIMEOUT_SECS,
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(
            config,
            Config {
                port: DEFAULT_HOST_PORT,
                api_key: None,
                backend_url: None,
                connect_timeout_secs: DEFAULT_BACKEND_CONNECT_TIMEOUT_SECS,
            }
        );
    }

    #[test]
    fn values_are_read_and_legacy_key_name_accepted() {
        let config = Config::from_lookup(lookup(&[
            ("HOST_PORT", "3000"),
            ("apikey", "secret"),
            ("BACKEND_URL", " http://backend/api "),
            ("BACKEND_CONNECT_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.backend_url.as_deref(), Some("http://backend/api"));
        assert_eq!(config.connect_timeout_secs, 3);
    }

    #[test]
    fn empty_values_count_as_unset() {
        let config = Config::from_lookup(lookup(&[("API_KEY", ""), ("BACKEND_URL", "  ")])).unwrap();
        assert_eq!(config.api_key, None);
        assert_eq!(config.backend_url, None);
    }

    #[test]
    fn invalid_port_is_an_error() {
        let err = Config::from_lookup(lookup(&[("HOST_PORT", "eighty")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                name: "HOST_PORT",
                value: "eighty".into()
            }
        );
    }
}
