use reqwest::Url;
use std::env;
use thiserror::Error;

pub const DATA_API_URL_VAR: &str = "DATA_API_URL";
pub const DATA_COMPILER_URL_VAR: &str = "DATA_COMPILER_URL";

const DEFAULT_DATA_API_URL: &str = "http://localhost:4000";
const DEFAULT_DATA_COMPILER_URL: &str = "http://localhost:4001";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} must be an absolute http(s) URL, got {value:?}")]
    InvalidUrl { var: &'static str, value: String },
}

/// Base URLs of the two backing services
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_api_url: String,
    pub compiler_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_api_url: DEFAULT_DATA_API_URL.to_string(),
            compiler_url: DEFAULT_DATA_COMPILER_URL.to_string(),
        }
    }
}

impl Config {
    /// Read the URL overrides from the process environment
    pub fn load() -> Result<Config, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Config {
            data_api_url: resolve(&lookup, DATA_API_URL_VAR, DEFAULT_DATA_API_URL)?,
            compiler_url: resolve(&lookup, DATA_COMPILER_URL_VAR, DEFAULT_DATA_COMPILER_URL)?,
        })
    }
}

/// Blank or unset falls back to the default; anything else must parse.
fn resolve<F>(lookup: &F, var: &'static str, default: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var).filter(|value| !value.trim().is_empty()) else {
        return Ok(default.to_string());
    };

    let value = raw.trim().trim_end_matches('/');
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(value.to_string()),
        _ => Err(ConfigError::InvalidUrl { var, value: raw }),
    }
}
