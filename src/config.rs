//! Runtime configuration read from environment variables.
//!
//! Every setting has a default that is logged when the variable is absent.
//! Values that are present but malformed are reported as [`ConfigError`]
//! rather than silently replaced.
//!
//! The log format is read here too, so `main` loads configuration before the
//! subscriber is installed.

use crate::session::adapters::firebase::DEFAULT_IDENTITY_ENDPOINT;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

const BIND_ADDRESS: &str = "COHORT_BIND_ADDRESS";
const DATABASE_URL: &str = "DATABASE_URL";
const DB_POOL_SIZE: &str = "COHORT_DB_POOL_SIZE";
const FIREBASE_API_KEY: &str = "FIREBASE_API_KEY";
const IDENTITY_ENDPOINT: &str = "COHORT_IDENTITY_ENDPOINT";
const IDENTITY_TIMEOUT_SECS: &str = "COHORT_IDENTITY_TIMEOUT_SECS";
const CORS_ORIGINS: &str = "COHORT_CORS_ORIGINS";
const COOKIE_SAME_SITE: &str = "COHORT_COOKIE_SAME_SITE";
const NAME_SUFFIX: &str = "COHORT_NAME_SUFFIX";
const LOG_FORMAT: &str = "COHORT_LOG_FORMAT";

const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_IDENTITY_TIMEOUT_SECS: u64 = 10;
const DEFAULT_NAME_SUFFIX: &str = "-IIITK";

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed.
    #[error("invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        /// Variable name.
        key: &'static str,
        /// Raw value found.
        value: String,
        /// Parser message.
        reason: String,
    },
}

/// `SameSite` attribute applied to session cookies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSitePolicy {
    /// Cookies are only sent on same-site requests.
    #[default]
    Strict,
    /// Cookies follow top-level navigations.
    Lax,
    /// Cookies are sent cross-site; browsers then require `Secure`.
    None,
}

impl FromStr for SameSitePolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lax" => Ok(Self::Lax),
            "none" => Ok(Self::None),
            other => Err(format!("expected strict, lax or none, got '{other}'")),
        }
    }
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected pretty or json, got '{other}'")),
        }
    }
}

/// Identity provider settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    /// Firebase web API key; without one every token is rejected.
    pub api_key: Option<String>,
    /// Identity Toolkit base URL.
    pub endpoint: String,
    /// Per-request timeout for token lookups.
    pub timeout: Duration,
}

/// Service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Socket the HTTP server listens on.
    pub bind_address: SocketAddr,
    /// `PostgreSQL` URL; in-memory adapters are used when absent.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub db_pool_size: u32,
    /// Identity provider settings.
    pub identity: IdentityConfig,
    /// Origins allowed to make credentialed cross-origin requests.
    pub cors_origins: Vec<String>,
    /// `SameSite` attribute of session cookies.
    pub cookie_same_site: SameSitePolicy,
    /// Institution suffix stripped from provider display names.
    pub name_suffix: String,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            database_url: None,
            db_pool_size: DEFAULT_POOL_SIZE,
            identity: IdentityConfig {
                api_key: None,
                endpoint: DEFAULT_IDENTITY_ENDPOINT.to_owned(),
                timeout: Duration::from_secs(DEFAULT_IDENTITY_TIMEOUT_SECS),
            },
            cors_origins: Vec::new(),
            cookie_same_site: SameSitePolicy::Strict,
            name_suffix: DEFAULT_NAME_SUFFIX.to_owned(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a malformed variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a malformed variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let source = Source { lookup };
        let timeout_secs: u64 =
            source.parsed_or(IDENTITY_TIMEOUT_SECS, DEFAULT_IDENTITY_TIMEOUT_SECS)?;

        Ok(Self {
            bind_address: source.parsed_or(BIND_ADDRESS, default_bind_address())?,
            database_url: source.optional(DATABASE_URL),
            db_pool_size: source.parsed_or(DB_POOL_SIZE, DEFAULT_POOL_SIZE)?,
            identity: IdentityConfig {
                api_key: source.optional(FIREBASE_API_KEY),
                endpoint: source.text_or(IDENTITY_ENDPOINT, DEFAULT_IDENTITY_ENDPOINT),
                timeout: Duration::from_secs(timeout_secs),
            },
            cors_origins: source
                .optional(CORS_ORIGINS)
                .map(|raw| split_origins(&raw))
                .unwrap_or_default(),
            cookie_same_site: source.parsed_or(COOKIE_SAME_SITE, SameSitePolicy::Strict)?,
            name_suffix: source.text_or(NAME_SUFFIX, DEFAULT_NAME_SUFFIX),
            log_format: source.parsed_or(LOG_FORMAT, LogFormat::Pretty)?,
        })
    }
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 5000))
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_owned)
        .collect()
}

struct Source<F> {
    lookup: F,
}

impl<F> Source<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, key: &'static str) -> Option<String> {
        let value = (self.lookup)(key).filter(|raw| !raw.trim().is_empty());
        if value.is_none() {
            info!(key, "not set");
        }
        value
    }

    fn text_or(&self, key: &'static str, default: &str) -> String {
        (self.lookup)(key)
            .filter(|raw| !raw.trim().is_empty())
            .unwrap_or_else(|| {
                info!(key, default, "not set, using default");
                default.to_owned()
            })
    }

    fn parsed_or<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr + std::fmt::Debug,
        T::Err: std::fmt::Display,
    {
        let Some(raw) = (self.lookup)(key).filter(|value| !value.trim().is_empty()) else {
            info!(key, ?default, "not set, using default");
            return Ok(default);
        };
        raw.trim().parse().map_err(|err: T::Err| {
            warn!(key, value = raw.as_str(), "invalid configuration value");
            ConfigError::InvalidValue {
                key,
                value: raw.clone(),
                reason: err.to_string(),
            }
        })
    }
}
