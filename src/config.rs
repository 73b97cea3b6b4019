//! Process configuration, read once from the environment at startup.

use crate::lookup;
use crate::text::Language;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_SESSION_TTL_SECS: u64 = 86_400;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub language: Language,
    /// Idle time after which a session may be swept. Zero disables sweeping.
    pub session_ttl: Duration,
    pub meteomatics_username: String,
    pub meteomatics_password: String,
    pub meteomatics_base_url: String,
    pub nominatim_base_url: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// `METEOMATICS_USERNAME` and `METEOMATICS_PASSWORD` are required; the
    /// process refuses to start without them rather than failing on the
    /// first weather lookup. Everything else has a default:
    /// `CLIMA_PORT` (8000), `CLIMA_LANG` (`es`),
    /// `CLIMA_SESSION_TTL_SECS` (one day), `METEOMATICS_BASE_URL` and
    /// `NOMINATIM_BASE_URL` (the public endpoints).
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match optional("CLIMA_PORT") {
            Some(value) => parse_var("CLIMA_PORT", &value)?,
            None => DEFAULT_PORT,
        };

        let language = match optional("CLIMA_LANG") {
            Some(value) => Language::from_tag(&value).ok_or(ConfigError::Invalid {
                var: "CLIMA_LANG",
                value,
            })?,
            None => Language::default(),
        };

        let ttl_secs = match optional("CLIMA_SESSION_TTL_SECS") {
            Some(value) => parse_var("CLIMA_SESSION_TTL_SECS", &value)?,
            None => DEFAULT_SESSION_TTL_SECS,
        };

        Ok(Self {
            port,
            language,
            session_ttl: Duration::from_secs(ttl_secs),
            meteomatics_username: required("METEOMATICS_USERNAME")?,
            meteomatics_password: required("METEOMATICS_PASSWORD")?,
            meteomatics_base_url: optional("METEOMATICS_BASE_URL")
                .unwrap_or_else(|| lookup::DEFAULT_METEOMATICS_URL.to_string()),
            nominatim_base_url: optional("NOMINATIM_BASE_URL")
                .unwrap_or_else(|| lookup::DEFAULT_NOMINATIM_URL.to_string()),
        })
    }
}

/// Missing and empty variables are treated the same.
fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::Missing(name))
}

fn parse_var<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid {
        var: name,
        value: value.to_string(),
    })
}
