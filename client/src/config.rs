use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::app::page_size::Viewport;
use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Flowerly REST API
    pub api_base_url: String,
    /// Where to persist tokens between runs (in-memory only when unset)
    pub token_file: Option<PathBuf>,
    pub http_timeout: Duration,
    /// Lower bound for the feed page size
    pub min_page_size: usize,
    /// Display area used to derive the feed page size
    pub viewport: Viewport,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            token_file: None,
            http_timeout: Duration::from_secs(15),
            min_page_size: 6,
            viewport: Viewport {
                width: 1280,
                height: 800,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let http_timeout = match lookup("FLOWERLY_HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = parse_number("FLOWERLY_HTTP_TIMEOUT_SECS", &raw)?;
                if secs == 0 {
                    return Err(ConfigError::Invalid {
                        name: "FLOWERLY_HTTP_TIMEOUT_SECS",
                        value: raw,
                    });
                }
                Duration::from_secs(secs)
            }
            None => defaults.http_timeout,
        };

        let min_page_size = match lookup("FLOWERLY_MIN_PAGE_SIZE") {
            Some(raw) => {
                let n = parse_number("FLOWERLY_MIN_PAGE_SIZE", &raw)? as usize;
                if n == 0 {
                    return Err(ConfigError::Invalid {
                        name: "FLOWERLY_MIN_PAGE_SIZE",
                        value: raw,
                    });
                }
                n
            }
            None => defaults.min_page_size,
        };

        let viewport = match lookup("FLOWERLY_VIEWPORT") {
            Some(raw) => raw.parse::<Viewport>().map_err(|_| ConfigError::Invalid {
                name: "FLOWERLY_VIEWPORT",
                value: raw.clone(),
            })?,
            None => defaults.viewport,
        };

        Ok(Self {
            api_base_url: lookup("FLOWERLY_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            token_file: lookup("FLOWERLY_TOKEN_FILE").map(PathBuf::from),
            http_timeout,
            min_page_size,
            viewport,
        })
    }
}

fn parse_number(name: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: raw.to_string(),
    })
}
