//! Application configuration loading from environment variables.
//!
//! All configuration is loaded from the environment at startup (a `.env` file is
//! honoured through `dotenvy` in `main`). Values are validated once, then the
//! resulting [`Config`] is shared read-only.
//!
//! # Environment Variables
//!
//! All variables are optional.
//! - `RUST_LOG`: Logging level (default: "info,face_compare=debug,tower_http=debug")
//! - `HOST`: Server bind address (default: "0.0.0.0")
//! - `PORT`: Server port (default: 5001)
//! - `ALLOWED_EXTENSIONS`: Comma-separated image extensions (default: "png,jpg,jpeg,gif")
//! - `MAX_UPLOAD_BYTES`: Maximum request body size (default: 20 MiB)
//! - `FACE_ENCODER_URL`: Remote face encoding endpoint. Encoding is disabled when unset.
//! - `FACE_ENCODER_TOKEN`: Bearer token sent to the encoding endpoint
//! - `FACE_ENCODER_TIMEOUT_SECS`: Per-request timeout for the encoder (default: 30)
//! - `FACE_MATCH_TOLERANCE`: Maximum encoding distance for a match (default: 0.6)
//! - `COMPARE_CONCURRENCY`: Comparisons allowed to run at once (default: 4)
//! - `COMPARE_QUEUE_TIMEOUT_SECS`: How long a request waits for a slot (default: 30)

use crate::domain::{
    comparison::entity::DEFAULT_MATCH_TOLERANCE, upload::policy::DEFAULT_ALLOWED_EXTENSIONS,
};
use serde::Deserialize;
use validator::Validate;

/// Complete server configuration loaded from environment.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Config {
    /// Server bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Lower-case image extensions accepted in uploaded filenames
    #[validate(length(min = 1))]
    pub allowed_extensions: Vec<String>,

    /// Request body limit applied to uploads
    #[validate(range(min = 1))]
    pub max_upload_bytes: usize,

    /// Remote face encoding endpoint (e.g., `http://encoder:8000/encode`)
    #[validate(url)]
    pub face_encoder_url: Option<String>,

    pub face_encoder_token: Option<String>,

    #[validate(range(min = 1))]
    pub face_encoder_timeout_secs: u64,

    /// Euclidean distance at or below which two faces are the same person
    #[validate(range(min = 0.0, max = 2.0))]
    pub face_match_tolerance: f32,

    #[validate(range(min = 1))]
    pub compare_concurrency: usize,

    pub compare_queue_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed, or if the
    /// resulting values fail validation.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns the raw value of a
    /// variable or `None` when it is unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env { lookup };
        let config = Self {
            host: env.or("HOST", "0.0.0.0".to_string())?,
            port: env.or("PORT", 5001)?,
            allowed_extensions: env.list("ALLOWED_EXTENSIONS", &DEFAULT_ALLOWED_EXTENSIONS),
            max_upload_bytes: env.or("MAX_UPLOAD_BYTES", 20 * 1024 * 1024)?,
            face_encoder_url: env.optional("FACE_ENCODER_URL"),
            face_encoder_token: env.optional("FACE_ENCODER_TOKEN"),
            face_encoder_timeout_secs: env.or("FACE_ENCODER_TIMEOUT_SECS", 30)?,
            face_match_tolerance: env.or("FACE_MATCH_TOLERANCE", DEFAULT_MATCH_TOLERANCE)?,
            compare_concurrency: env.or("COMPARE_CONCURRENCY", 4)?,
            compare_queue_timeout_secs: env.or("COMPARE_QUEUE_TIMEOUT_SECS", 30)?,
        };

        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            max_upload_bytes: 20 * 1024 * 1024,
            face_encoder_url: None,
            face_encoder_token: None,
            face_encoder_timeout_secs: 30,
            face_match_tolerance: DEFAULT_MATCH_TOLERANCE,
            compare_concurrency: 4,
            compare_queue_timeout_secs: 30,
        }
    }
}

struct Env<F> {
    lookup: F,
}

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Load a variable with a default value.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is set but cannot be parsed.
    fn or<T>(&self, key: &str, default: T) -> anyhow::Result<T>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match (self.lookup)(key) {
            Some(val) => val
                .trim()
                .parse::<T>()
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", key, e)),
            None => Ok(default),
        }
    }

    /// Treats an unset or blank variable as absent.
    fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn list(&self, key: &str, default: &[&str]) -> Vec<String> {
        match self.optional(key) {
            Some(raw) => parse_list(&raw),
            None => default.iter().map(|s| s.to_string()).collect(),
        }
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|item| item.trim().trim_start_matches('.').to_lowercase())
        .filter(|item| !item.is_empty())
        .collect()
}
