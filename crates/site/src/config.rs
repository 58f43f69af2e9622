//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `NOIEVOI_HOST` - Bind address (default: 127.0.0.1)
//! - `NOIEVOI_PORT` - Listen port (default: 3000)
//! - `NOIEVOI_BASE_URL` - Public URL of the site (default: <http://localhost:3000>)
//! - `NOIEVOI_DATA_DIR` - Directory holding the JSON data files (default: data)
//! - `NOIEVOI_STATIC_DIR` - Directory served under `/static` (default: crates/site/static)
//! - `NOIEVOI_LOGIN_DELAY_MS` - Pause before answering a login attempt (default: 800)
//! - `NOIEVOI_EPHEMERAL` - Keep all data in memory instead of `NOIEVOI_DATA_DIR` (default: false)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Site application configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the site
    pub base_url: String,
    /// Directory for persisted data
    pub data_dir: PathBuf,
    /// Directory of static assets
    pub static_dir: PathBuf,
    /// Delay applied to every login attempt
    pub login_delay: Duration,
    /// Keep data in memory for the life of the process
    pub ephemeral: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
    pub sentry_sample_rate: f32,
    pub sentry_traces_sample_rate: f32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            data_dir: PathBuf::from("data"),
            static_dir: PathBuf::from("crates/site/static"),
            login_delay: Duration::from_millis(800),
            ephemeral: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let login_delay_ms: u64 = parse_or(&lookup, "NOIEVOI_LOGIN_DELAY_MS", 800)?;

        Ok(Self {
            host: parse_or(&lookup, "NOIEVOI_HOST", defaults.host)?,
            port: parse_or(&lookup, "NOIEVOI_PORT", defaults.port)?,
            base_url: lookup("NOIEVOI_BASE_URL").unwrap_or(defaults.base_url),
            data_dir: lookup("NOIEVOI_DATA_DIR").map_or(defaults.data_dir, PathBuf::from),
            static_dir: lookup("NOIEVOI_STATIC_DIR").map_or(defaults.static_dir, PathBuf::from),
            login_delay: Duration::from_millis(login_delay_ms),
            ephemeral: parse_or(&lookup, "NOIEVOI_EPHEMERAL", defaults.ephemeral)?,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_or(&lookup, "SENTRY_SAMPLE_RATE", defaults.sentry_sample_rate)?,
            sentry_traces_sample_rate: parse_or(
                &lookup,
                "SENTRY_TRACES_SAMPLE_RATE",
                defaults.sentry_traces_sample_rate,
            )?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the site is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable if set, otherwise use `default`.
fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<SiteConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        SiteConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = from_pairs(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.login_delay, Duration::from_millis(800));
        assert!(config.sentry_dsn.is_none());
        assert!(!config.is_secure());
        assert!(!config.ephemeral);
    }

    #[test]
    fn test_ephemeral_flag() {
        assert!(from_pairs(&[("NOIEVOI_EPHEMERAL", "true")]).unwrap().ephemeral);
        assert!(!from_pairs(&[("NOIEVOI_EPHEMERAL", "false")]).unwrap().ephemeral);
        let err = from_pairs(&[("NOIEVOI_EPHEMERAL", "yes")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "NOIEVOI_EPHEMERAL"));
    }

    #[test]
    fn test_overrides() {
        let config = from_pairs(&[
            ("NOIEVOI_HOST", "0.0.0.0"),
            ("NOIEVOI_PORT", "8080"),
            ("NOIEVOI_BASE_URL", "https://noievoi.com"),
            ("NOIEVOI_DATA_DIR", "/var/lib/noievoi"),
            ("NOIEVOI_LOGIN_DELAY_MS", "0"),
            ("SENTRY_SAMPLE_RATE", "0.5"),
        ])
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert!(config.is_secure());
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/noievoi"));
        assert_eq!(config.login_delay, Duration::ZERO);
        assert!((config.sentry_sample_rate - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_invalid_port() {
        let err = from_pairs(&[("NOIEVOI_PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "NOIEVOI_PORT"));
    }

    #[test]
    fn test_invalid_host() {
        assert!(from_pairs(&[("NOIEVOI_HOST", "localhost:3000")]).is_err());
    }

    #[test]
    fn test_empty_dsn_is_ignored() {
        let config = from_pairs(&[("SENTRY_DSN", "")]).unwrap();
        assert!(config.sentry_dsn.is_none());
    }
}
