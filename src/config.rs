//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Resolver address used when `POLICY_URL` is not set.
pub const DEFAULT_POLICY_URL: &str = "http://localhost:10001";

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP port of the todo service
    pub server_port: u16,
    /// SQLite database path (`:memory:` for an in-memory database)
    pub database_path: String,
    /// Base URL of the policy resolver; `None` selects the static gateway
    pub policy_url: Option<String>,
    /// Upper bound on a single policy resolve call, in milliseconds
    pub policy_timeout_ms: u64,
    /// Decision returned by the static gateway
    pub policy_default_use_cache: bool,
    /// Version token used when a request does not carry one
    pub default_client_version: String,
    /// TTL in seconds for single-item cache entries
    pub item_cache_ttl: u64,
    /// TTL in seconds for the bulk list cache entry
    pub list_cache_ttl: u64,
    /// Maximum number of keys the in-memory cache can hold
    pub max_cache_entries: usize,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// HTTP port of the policy resolver
    pub policy_port: u16,
    /// The resolver enables caching for versions strictly greater than this
    pub policy_min_version: String,
}

/// Cache timing knobs used by the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSettings {
    pub item_ttl: Duration,
    pub list_ttl: Duration,
    pub policy_timeout: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            item_ttl: Duration::from_secs(300),
            list_ttl: Duration::from_secs(300),
            policy_timeout: Duration::from_millis(500),
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - Todo service port (default: 10000)
    /// - `DATABASE_PATH` - SQLite file (default: todo.db)
    /// - `POLICY_URL` - Policy resolver base URL (default: http://localhost:10001;
    ///   set it empty to use the static gateway)
    /// - `POLICY_TIMEOUT_MS` - Resolve timeout (default: 500)
    /// - `POLICY_DEFAULT_USE_CACHE` - Static gateway decision (default: false)
    /// - `DEFAULT_CLIENT_VERSION` - Fallback version token (default: 1.1)
    /// - `ITEM_CACHE_TTL` - Single-item TTL in seconds (default: 300)
    /// - `LIST_CACHE_TTL` - Bulk list TTL in seconds (default: 300)
    /// - `MAX_CACHE_ENTRIES` - Cache capacity (default: 10000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    /// - `POLICY_PORT` - Policy resolver port (default: 10001)
    /// - `POLICY_MIN_VERSION` - Resolver version threshold (default: 1.0)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            database_path: env::var("DATABASE_PATH").unwrap_or(defaults.database_path),
            policy_url: match env::var("POLICY_URL") {
                Ok(url) if url.trim().is_empty() => None,
                Ok(url) => Some(url),
                Err(_) => defaults.policy_url,
            },
            policy_timeout_ms: env_or("POLICY_TIMEOUT_MS", defaults.policy_timeout_ms),
            policy_default_use_cache: env_or(
                "POLICY_DEFAULT_USE_CACHE",
                defaults.policy_default_use_cache,
            ),
            default_client_version: env::var("DEFAULT_CLIENT_VERSION")
                .unwrap_or(defaults.default_client_version),
            item_cache_ttl: env_or("ITEM_CACHE_TTL", defaults.item_cache_ttl),
            list_cache_ttl: env_or("LIST_CACHE_TTL", defaults.list_cache_ttl),
            max_cache_entries: env_or("MAX_CACHE_ENTRIES", defaults.max_cache_entries),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            policy_port: env_or("POLICY_PORT", defaults.policy_port),
            policy_min_version: env::var("POLICY_MIN_VERSION")
                .unwrap_or(defaults.policy_min_version),
        }
    }

    /// Returns the TTLs and resolver timeout as durations.
    pub fn cache_settings(&self) -> CacheSettings {
        CacheSettings {
            item_ttl: Duration::from_secs(self.item_cache_ttl),
            list_ttl: Duration::from_secs(self.list_cache_ttl),
            policy_timeout: Duration::from_millis(self.policy_timeout_ms),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 10000,
            database_path: "todo.db".to_string(),
            policy_url: Some(DEFAULT_POLICY_URL.to_string()),
            policy_timeout_ms: 500,
            policy_default_use_cache: false,
            default_client_version: "1.1".to_string(),
            item_cache_ttl: 300,
            list_cache_ttl: 300,
            max_cache_entries: 10_000,
            cleanup_interval: 1,
            policy_port: 10001,
            policy_min_version: "1.0".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 10000);
        assert_eq!(config.item_cache_ttl, 300);
        assert_eq!(config.list_cache_ttl, 300);
        assert_eq!(config.policy_port, 10001);
        assert_eq!(config.policy_url.as_deref(), Some("http://localhost:10001"));
        assert!(!config.policy_default_use_cache);
    }

    #[test]
    fn test_empty_policy_url_selects_static_gateway() {
        env::set_var("POLICY_URL", "");
        let config = Config::from_env();
        env::remove_var("POLICY_URL");

        assert!(config.policy_url.is_none());
    }

    #[test]
    fn test_cache_settings_from_config() {
        let config = Config {
            item_cache_ttl: 60,
            list_cache_ttl: 120,
            policy_timeout_ms: 250,
            ..Config::default()
        };

        let settings = config.cache_settings();
        assert_eq!(settings.item_ttl, Duration::from_secs(60));
        assert_eq!(settings.list_ttl, Duration::from_secs(120));
        assert_eq!(settings.policy_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_default_settings_match_default_config() {
        assert_eq!(CacheSettings::default(), Config::default().cache_settings());
    }
}
