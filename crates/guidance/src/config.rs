//! Guidance service configuration

use std::num::NonZeroUsize;
use std::time::Duration;

use crate::error::ConfigError;

const DEFAULT_MODEL: &str = "deepseek/deepseek-r1-zero:free";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_REFERER: &str = "http://localhost:8000";
const DEFAULT_APP_TITLE: &str = "Skin Disease Detection System";
const DEFAULT_CACHE_CAPACITY: usize = 100;
const DEFAULT_CACHE_TTL_SECS: u64 = 24 * 60 * 60;

/// Service configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub request_timeout: Duration,
    pub referer: String,
    pub app_title: String,
    pub cache_capacity: NonZeroUsize,
    /// `None` keeps entries until they are evicted for space
    pub cache_ttl: Option<Duration>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let api_key =
            get("OPENROUTER_API_KEY").ok_or(ConfigError::Missing("OPENROUTER_API_KEY"))?;
        let api_url =
            get("OPENROUTER_API_URL").ok_or(ConfigError::Missing("OPENROUTER_API_URL"))?;

        let timeout_secs =
            parse_number("OPENROUTER_TIMEOUT_SECS", get("OPENROUTER_TIMEOUT_SECS"))?
                .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "OPENROUTER_TIMEOUT_SECS",
                value: "0".into(),
                reason: "timeout must be positive".into(),
            });
        }

        let capacity =
            parse_number("GUIDANCE_CACHE_CAPACITY", get("GUIDANCE_CACHE_CAPACITY"))?
                .unwrap_or(DEFAULT_CACHE_CAPACITY as u64);
        let cache_capacity = usize::try_from(capacity)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or_else(|| ConfigError::Invalid {
                var: "GUIDANCE_CACHE_CAPACITY",
                value: capacity.to_string(),
                reason: "capacity must be positive".into(),
            })?;

        let ttl_secs =
            parse_number("GUIDANCE_CACHE_TTL_SECS", get("GUIDANCE_CACHE_TTL_SECS"))?
                .unwrap_or(DEFAULT_CACHE_TTL_SECS);

        Ok(Self {
            api_key,
            api_url,
            model: get("OPENROUTER_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
            request_timeout: Duration::from_secs(timeout_secs),
            referer: get("OPENROUTER_REFERER").unwrap_or_else(|| DEFAULT_REFERER.into()),
            app_title: get("OPENROUTER_APP_TITLE").unwrap_or_else(|| DEFAULT_APP_TITLE.into()),
            cache_capacity,
            cache_ttl: (ttl_secs > 0).then(|| Duration::from_secs(ttl_secs)),
        })
    }
}

fn parse_number(var: &'static str, raw: Option<String>) -> Result<Option<u64>, ConfigError> {
    raw.map(|value| {
        value.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
            var,
            value: value.clone(),
            reason: e.to_string(),
        })
    })
    .transpose()
}
