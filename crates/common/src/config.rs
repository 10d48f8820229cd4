//! Application configuration.

use serde::Deserialize;
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Redis configuration. Sessions fall back to process memory when absent.
    #[serde(default)]
    pub redis: Option<RedisConfig>,
    /// Session configuration.
    #[serde(default)]
    pub session: SessionConfig,
    /// Outbound collaborator services.
    #[serde(default)]
    pub services: ServicesConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Origins allowed to make credentialed cross-site requests.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
    /// Upper bound for handling a single inbound request.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Maximum accepted request body (photos arrive inline).
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Redis configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    /// Redis connection URL.
    pub url: String,
    /// Key prefix for all Redis keys.
    #[serde(default = "default_redis_prefix")]
    pub prefix: String,
}

/// Session configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Sliding expiration window in days.
    #[serde(default = "default_session_ttl_days")]
    pub ttl_days: i64,
    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Mark the cookie `Secure` (required for `SameSite=None` in browsers).
    #[serde(default = "default_true")]
    pub secure_cookie: bool,
}

/// External collaborator endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ServicesConfig {
    /// Base URL of the donation scoring service.
    #[serde(default = "default_scorer_url")]
    pub scorer_url: String,
    /// Base URL of the certificate generation service.
    #[serde(default = "default_certificate_url")]
    pub certificate_url: String,
    /// Timeout applied to every outbound call.
    #[serde(default = "default_outbound_timeout")]
    pub timeout_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_days: default_session_ttl_days(),
            cookie_name: default_cookie_name(),
            secure_cookie: true,
        }
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            scorer_url: default_scorer_url(),
            certificate_url: default_certificate_url(),
            timeout_secs: default_outbound_timeout(),
        }
    }
}

impl SessionConfig {
    /// Session lifetime in seconds.
    #[must_use]
    pub const fn ttl_secs(&self) -> i64 {
        self.ttl_days * 24 * 60 * 60
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    5000
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:5174".to_string(),
    ]
}

const fn default_request_timeout() -> u64 {
    30
}

const fn default_body_limit() -> usize {
    10 * 1024 * 1024
}

const fn default_max_connections() -> u32 {
    20
}

const fn default_min_connections() -> u32 {
    2
}

fn default_redis_prefix() -> String {
    "aaharsetu".to_string()
}

const fn default_session_ttl_days() -> i64 {
    7
}

fn default_cookie_name() -> String {
    "sid".to_string()
}

const fn default_true() -> bool {
    true
}

fn default_scorer_url() -> String {
    "http://localhost:5001".to_string()
}

fn default_certificate_url() -> String {
    "http://localhost:5002".to_string()
}

const fn default_outbound_timeout() -> u64 {
    10
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `.env` (if present)
    /// 2. `config/default.toml`
    /// 3. `config/{environment}.toml` (based on `AAHARSETU_ENV`)
    /// 4. Environment variables with `AAHARSETU__` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let _ = dotenvy::dotenv();
        let env = std::env::var("AAHARSETU_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("AAHARSETU")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("AAHARSETU")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
