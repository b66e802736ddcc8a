use crate::auth::JwtConfig;

/// Review cache TTL: 6 hours
pub const REVIEW_CACHE_TTL_MS: i64 = 6 * 60 * 60 * 1000;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | DATA_DIR | ./data | Database and log storage |
/// | HTTP_PORT | 3000 | HTTP listen port |
/// | ENVIRONMENT | development | Runtime environment |
/// | GOOGLE_API_KEY | (empty) | Google Places API key for the review proxy |
/// | REVIEW_CACHE_TTL_MS | 21600000 | Review cache TTL in milliseconds |
/// | JWT_SECRET | (dev fallback) | JWT signing secret |
///
/// # Example
///
/// ```ignore
/// DATA_DIR=/var/lib/backoffice HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Data directory for the embedded database
    pub data_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Google Places API key (review proxy upstream)
    pub google_api_key: String,
    /// Review cache TTL (milliseconds)
    pub review_cache_ttl_ms: i64,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            jwt: JwtConfig::from_env(),
            google_api_key: std::env::var("GOOGLE_API_KEY").unwrap_or_default(),
            review_cache_ttl_ms: std::env::var("REVIEW_CACHE_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(REVIEW_CACHE_TTL_MS),
        }
    }

    /// Database path under the data directory
    pub fn database_path(&self) -> String {
        format!("{}/backoffice.db", self.data_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
