/// Configuration management for scribe-service
///
/// Loads configuration from environment variables.
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Redis configuration
    pub redis: RedisConfig,
    /// Auth token verification
    pub auth: AuthConfig,
    /// Page cache tuning
    pub cache: CacheConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// HTTP port
    pub port: u16,
    /// Whether the operator endpoints (cache clear) are mounted
    pub admin_enabled: bool,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Min connections in pool
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Redis configuration. The URL is optional: without it the service runs
/// with the page cache disabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    pub url: Option<String>,
}

/// Auth token verification settings (HS256 secret shared with the
/// authentication service)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

/// Page cache tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// TTL for cached index pages, in seconds
    #[serde(default = "default_page_ttl")]
    pub page_ttl_seconds: u64,
}

// Default values
fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_page_ttl() -> u64 {
    20
}

const MIN_SECRET_LEN: usize = 32;

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let app = AppConfig {
            env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8080),
            admin_enabled: std::env::var("ADMIN_API_ENABLED")
                .map(|s| s == "true" || s == "1")
                .unwrap_or(false),
        };

        let database = DatabaseConfig {
            url: std::env::var("DATABASE_URL")
                .context("DATABASE_URL environment variable not set")?,
            max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_max_connections),
            min_connections: std::env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_min_connections),
        };

        let redis = RedisConfig {
            url: std::env::var("REDIS_URL").ok(),
        };

        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) => {
                if app.env == "production" && secret.len() < MIN_SECRET_LEN {
                    bail!(
                        "JWT_SECRET must be at least {} bytes in production",
                        MIN_SECRET_LEN
                    );
                }
                secret
            }
            Err(_) => {
                if app.env == "production" {
                    bail!("JWT_SECRET environment variable not set");
                }
                // Development fallback only
                "scribe-dev-secret".to_string()
            }
        };
        let auth = AuthConfig { jwt_secret };

        let cache = CacheConfig {
            page_ttl_seconds: std::env::var("CACHE_PAGE_TTL_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_page_ttl),
        };

        Ok(Config {
            app,
            database,
            redis,
            auth,
            cache,
        })
    }
}
