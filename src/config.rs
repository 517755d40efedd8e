use crate::constants::*;
use crate::repository::Mode;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: String,
    pub data_path: String,
}

/// Settings for the controller side: where the local slot lives, where the
/// remote service answers, and which backend starts active.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub storage_path: String,
    pub mode: Mode,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort(String),
    InvalidMode(String),
    InvalidApiUrl(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidPort(port) => {
                write!(f, "Invalid port number: {}", port)
            }
            ConfigError::InvalidMode(mode) => {
                write!(f, "Invalid mode '{}', expected 'local' or 'remote'", mode)
            }
            ConfigError::InvalidApiUrl(url) => {
                write!(f, "Invalid API url: {}", url)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = lookup("SERVER_PORT").unwrap_or_else(|| DEFAULT_PORT.to_string());
        let data_path = lookup("DATABASE_PATH").unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());

        // Validate port is a valid number
        if port.parse::<u16>().is_err() {
            return Err(ConfigError::InvalidPort(port));
        }

        Ok(Config {
            host,
            port,
            data_path,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("EXPENSES_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let storage_path =
            lookup("EXPENSES_STORAGE_PATH").unwrap_or_else(|| DEFAULT_STORAGE_PATH.to_string());
        let mode = match lookup("EXPENSES_MODE") {
            Some(value) => value.parse()?,
            None => Mode::Local,
        };

        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(ConfigError::InvalidApiUrl(api_url));
        }

        Ok(ClientConfig {
            api_url,
            storage_path,
            mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn server_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
        assert_eq!(config.data_path, "data");
    }

    #[test]
    fn server_rejects_bad_port() {
        let err = Config::from_lookup(lookup_from(&[("SERVER_PORT", "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(p) if p == "http"));
    }

    #[test]
    fn client_defaults_to_local_mode() {
        let config = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.mode, Mode::Local);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.storage_path, DEFAULT_STORAGE_PATH);
    }

    #[test]
    fn client_reads_mode_and_url() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("EXPENSES_MODE", "Remote"),
            ("EXPENSES_API_URL", "https://budget.example/api/expenses"),
        ]))
        .unwrap();
        assert_eq!(config.mode, Mode::Remote);
        assert_eq!(config.api_url, "https://budget.example/api/expenses");
    }

    #[test]
    fn client_rejects_unknown_mode_and_url() {
        assert!(matches!(
            ClientConfig::from_lookup(lookup_from(&[("EXPENSES_MODE", "mongo")])),
            Err(ConfigError::InvalidMode(_))
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup_from(&[("EXPENSES_API_URL", "ftp://x")])),
            Err(ConfigError::InvalidApiUrl(_))
        ));
    }
}
