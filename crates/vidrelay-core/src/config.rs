//! Configuration module
//!
//! Runtime settings for the relay: listen port, CORS, request size limits, the
//! remote video host endpoint and how multipart file parts are buffered.

use std::env;
use std::path::PathBuf;

const SERVER_PORT: u16 = 3000;
const MAX_UPLOAD_SIZE_MB: usize = 2048;
const REMOTE_TIMEOUT_SECS: u64 = 3600;
const HTTP_CONCURRENCY_LIMIT: usize = 10_000;
const YOUTUBE_API_BASE_URL: &str = "https://www.googleapis.com";

#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    /// Upper bound for a whole POST body, all files included.
    pub max_upload_size_mb: usize,
    /// Server-level cap on in-flight HTTP requests.
    pub http_concurrency_limit: usize,
    pub youtube_api_base_url: String,
    /// Optional `snippet.categoryId` attached to every uploaded video.
    pub youtube_category_id: Option<String>,
    /// Transport timeout for a single remote create-video call.
    pub remote_timeout_secs: u64,
    /// Stream file parts to temporary files instead of holding them in memory.
    pub spool_enabled: bool,
    pub spool_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: SERVER_PORT,
            environment: "development".to_string(),
            cors_origins: vec!["*".to_string()],
            max_upload_size_mb: MAX_UPLOAD_SIZE_MB,
            http_concurrency_limit: HTTP_CONCURRENCY_LIMIT,
            youtube_api_base_url: YOUTUBE_API_BASE_URL.to_string(),
            youtube_category_id: None,
            remote_timeout_secs: REMOTE_TIMEOUT_SECS,
            spool_enabled: true,
            spool_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from `.env` (if present) and the process environment.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Unparseable numbers fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or(defaults.environment);

        let cors_origins_str = lookup("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        if is_production_name(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }
        let cors_origins = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let server_port = lookup("SERVER_PORT")
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(defaults.server_port);

        let max_upload_size_mb = lookup("MAX_UPLOAD_SIZE_MB")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(defaults.max_upload_size_mb);

        let http_concurrency_limit = lookup("HTTP_CONCURRENCY_LIMIT")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(defaults.http_concurrency_limit)
            .max(1);

        let youtube_api_base_url = lookup("YOUTUBE_API_BASE_URL")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.youtube_api_base_url);

        let youtube_category_id = lookup("YOUTUBE_CATEGORY_ID")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let remote_timeout_secs = lookup("REMOTE_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(defaults.remote_timeout_secs);

        let spool_enabled = lookup("UPLOAD_SPOOL_ENABLED")
            .map(|s| parse_bool(&s))
            .unwrap_or(defaults.spool_enabled);

        let spool_dir = lookup("UPLOAD_SPOOL_DIR")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            server_port,
            environment,
            cors_origins,
            max_upload_size_mb,
            http_concurrency_limit,
            youtube_api_base_url,
            youtube_category_id,
            remote_timeout_secs,
            spool_enabled,
            spool_dir,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_upload_size_mb == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than zero"));
        }

        if self.remote_timeout_secs == 0 {
            return Err(anyhow::anyhow!("REMOTE_TIMEOUT_SECS must be greater than zero"));
        }

        if !self.youtube_api_base_url.starts_with("http://")
            && !self.youtube_api_base_url.starts_with("https://")
        {
            return Err(anyhow::anyhow!(
                "YOUTUBE_API_BASE_URL must be an http(s) URL"
            ));
        }

        if let Some(dir) = &self.spool_dir {
            if self.spool_enabled && !dir.is_dir() {
                return Err(anyhow::anyhow!(
                    "UPLOAD_SPOOL_DIR '{}' is not a directory",
                    dir.display()
                ));
            }
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_name(&self.environment)
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.max_upload_size_mb.saturating_mul(1024 * 1024)
    }
}

fn is_production_name(environment: &str) -> bool {
    let env = environment.to_lowercase();
    env == "production" || env == "prod"
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
