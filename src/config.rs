//! Configuration Module
//!
//! Handles loading and managing configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::error::{PokedexError, Result};

/// Default reaper period, also the default TTL.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Default PokeAPI root.
pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";

// == Cache Config ==
/// Expiry policy for a [`Cache`](crate::cache::Cache).
///
/// With `ttl` unset the threshold equals `sweep_interval`, so an entry lives
/// for more than `I` and at most `2I` before the reaper removes it. Setting a
/// shorter `ttl` tightens that bound to `(ttl, ttl + I]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// How often the reaper sweeps the store
    pub sweep_interval: Duration,
    /// Maximum age before an entry is swept; defaults to `sweep_interval`
    pub ttl: Option<Duration>,
}

impl CacheConfig {
    /// Creates a config where the TTL is coupled to the sweep interval.
    pub fn new(sweep_interval: Duration) -> Self {
        Self {
            sweep_interval,
            ttl: None,
        }
    }

    /// Sets an explicit TTL, decoupled from the sweep interval.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Returns the age threshold the reaper evicts at.
    pub fn effective_ttl(&self) -> Duration {
        self.ttl.unwrap_or(self.sweep_interval)
    }

    /// Rejects zero durations.
    pub fn validate(&self) -> Result<()> {
        if self.sweep_interval.is_zero() {
            return Err(PokedexError::InvalidConfig(
                "sweep interval must be greater than zero".to_string(),
            ));
        }
        if self.ttl.is_some_and(|ttl| ttl.is_zero()) {
            return Err(PokedexError::InvalidConfig(
                "ttl must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SWEEP_INTERVAL)
    }
}

// == App Config ==
/// Pokedex configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Response cache policy
    pub cache: CacheConfig,
    /// PokeAPI root URL, without trailing slash
    pub api_base_url: String,
    /// Per-request HTTP timeout
    pub http_timeout: Duration,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `POKEDEX_CACHE_INTERVAL_SECS` - Reaper period in seconds (default: 5)
    /// - `POKEDEX_CACHE_TTL_SECS` - Entry TTL in seconds (default: same as interval)
    /// - `POKEAPI_BASE_URL` - PokeAPI root (default: https://pokeapi.co/api/v2)
    /// - `POKEDEX_HTTP_TIMEOUT_SECS` - HTTP timeout in seconds (default: 10)
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let sweep_interval = parse_secs("POKEDEX_CACHE_INTERVAL_SECS")
            .unwrap_or(defaults.cache.sweep_interval);
        let ttl = parse_secs("POKEDEX_CACHE_TTL_SECS");

        Self {
            cache: CacheConfig {
                sweep_interval,
                ttl,
            },
            api_base_url: env::var("POKEAPI_BASE_URL")
                .ok()
                .map(|v| v.trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.api_base_url),
            http_timeout: parse_secs("POKEDEX_HTTP_TIMEOUT_SECS")
                .unwrap_or(defaults.http_timeout),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            http_timeout: Duration::from_secs(10),
        }
    }
}

fn parse_secs(name: &str) -> Option<Duration> {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache.sweep_interval, Duration::from_secs(5));
        assert_eq!(config.cache.ttl, None);
        assert_eq!(config.api_base_url, "https://pokeapi.co/api/v2");
        assert_eq!(config.http_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("POKEDEX_CACHE_INTERVAL_SECS");
        env::remove_var("POKEDEX_CACHE_TTL_SECS");
        env::remove_var("POKEAPI_BASE_URL");
        env::remove_var("POKEDEX_HTTP_TIMEOUT_SECS");

        let config = Config::from_env();
        assert_eq!(config.cache, CacheConfig::default());
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.http_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_effective_ttl_coupled() {
        let config = CacheConfig::new(Duration::from_millis(100));
        assert_eq!(config.effective_ttl(), Duration::from_millis(100));
    }

    #[test]
    fn test_effective_ttl_decoupled() {
        let config = CacheConfig::new(Duration::from_secs(5)).with_ttl(Duration::from_secs(1));
        assert_eq!(config.effective_ttl(), Duration::from_secs(1));
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let config = CacheConfig::new(Duration::ZERO);
        assert!(matches!(
            config.validate(),
            Err(PokedexError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_ttl() {
        let config = CacheConfig::new(Duration::from_secs(1)).with_ttl(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(CacheConfig::default().validate().is_ok());
    }
}
