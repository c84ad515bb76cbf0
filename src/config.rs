//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// YouTube Data API v3 key (passed as a query parameter)
    pub youtube_api_key: String,
    /// GCP project ID for Firestore
    pub gcp_project_id: String,
    /// Optional channel to substitute when input uses a custom URL shape
    /// (`/c/`, `/user/`, `/@handle`) that cannot be canonicalized offline.
    pub fallback_channel_id: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            youtube_api_key: env::var("YOUTUBE_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("YOUTUBE_API_KEY"))?,
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            fallback_channel_id: env::var("FALLBACK_CHANNEL_ID")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("YOUTUBE_API_KEY", "test_key");
        env::remove_var("GCP_PROJECT_ID");
        env::remove_var("FALLBACK_CHANNEL_ID");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.youtube_api_key, "test_key");
        assert_eq!(config.gcp_project_id, "local-dev");
        assert!(config.fallback_channel_id.is_none());
    }

    #[test]
    fn test_blank_fallback_is_ignored() {
        env::set_var("YOUTUBE_API_KEY", "test_key");
        env::set_var("FALLBACK_CHANNEL_ID", "  ");

        let config = Config::from_env().expect("Config should load");
        assert!(config.fallback_channel_id.is_none());

        env::remove_var("FALLBACK_CHANNEL_ID");
    }
}
