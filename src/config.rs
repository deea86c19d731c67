use serde::Deserialize;
use std::time::Duration;

use crate::recaptcha::DEFAULT_VERIFY_URL;

/// Process configuration, read from the environment (and an optional `.env`).
///
/// Variable names are the upper-cased field names, e.g. `PORT` or
/// `RECAPTCHA_SECRET_KEY`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_database_path")]
    pub database_path: String,
    #[serde(default)]
    pub recaptcha_secret_key: String,
    #[serde(default)]
    pub recaptcha_site_key: String,
    #[serde(default = "default_verify_url")]
    pub recaptcha_verify_url: String,
    #[serde(default = "default_verify_timeout")]
    pub recaptcha_timeout_secs: u64,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    // Reject reviews whose restaurant is not in the store
    #[serde(default = "default_require_existing_restaurant")]
    pub require_existing_restaurant: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Env(#[from] envy::Error),

    #[error("Invalid configuration: RECAPTCHA_TIMEOUT_SECS must be at least 1")]
    ZeroTimeout,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_database_path() -> String {
    "restaurants.db".to_string()
}

fn default_verify_url() -> String {
    DEFAULT_VERIFY_URL.to_string()
}

fn default_verify_timeout() -> u64 {
    10
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_require_existing_restaurant() -> bool {
    true
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        envy::from_env::<Self>()?.validated()
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Self>(vars)?.validated()
    }

    // A zero timeout would fail every verification call immediately
    fn validated(self) -> Result<Self, ConfigError> {
        if self.recaptcha_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(self)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn recaptcha_timeout(&self) -> Duration {
        Duration::from_secs(self.recaptcha_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_vars(Vec::new()).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
        assert_eq!(config.database_path, "restaurants.db");
        assert_eq!(config.recaptcha_verify_url, DEFAULT_VERIFY_URL);
        assert_eq!(config.recaptcha_timeout(), Duration::from_secs(10));
        assert!(config.recaptcha_secret_key.is_empty());
        assert!(config.require_existing_restaurant);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = Config::from_vars(vars(&[
            ("PORT", "9100"),
            ("RECAPTCHA_SECRET_KEY", "shh"),
            ("RECAPTCHA_TIMEOUT_SECS", "3"),
            ("REQUIRE_EXISTING_RESTAURANT", "false"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.recaptcha_secret_key, "shh");
        assert_eq!(config.recaptcha_timeout(), Duration::from_secs(3));
        assert!(!config.require_existing_restaurant);
    }

    #[test]
    fn invalid_port_is_rejected() {
        assert!(matches!(
            Config::from_vars(vars(&[("PORT", "eighty")])),
            Err(ConfigError::Env(_))
        ));
    }

    #[test]
    fn zero_verification_timeout_is_rejected() {
        assert!(matches!(
            Config::from_vars(vars(&[("RECAPTCHA_TIMEOUT_SECS", "0")])),
            Err(ConfigError::ZeroTimeout)
        ));
    }
}
