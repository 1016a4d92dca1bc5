//! API configuration.

use std::path::PathBuf;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Public base URL, used in listing responses
    pub base_url: String,
    /// Root directory for per-video artifact directories
    pub video_root: PathBuf,
    /// Postgres connection URL
    pub database_url: String,
    /// Redis connection URL (shared progress backend)
    pub redis_url: String,
    /// Session service base URL (identity collaborator)
    pub session_service_url: String,
    /// Max upload body size in bytes
    pub max_body_size: usize,
    /// Environment (development/production)
    pub environment: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            base_url: "http://localhost:5000".to_string(),
            video_root: PathBuf::from("video_data"),
            database_url: "postgres://localhost/vidsite".to_string(),
            redis_url: "redis://localhost:6379".to_string(),
            session_service_url: "http://localhost:5000".to_string(),
            max_body_size: 500 * 1024 * 1024, // 500MB
            environment: "development".to_string(),
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("API_HOST").unwrap_or(defaults.host),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            base_url: std::env::var("BASE_URL").unwrap_or(defaults.base_url),
            video_root: std::env::var("VIDEO_FOLDER")
                .map(PathBuf::from)
                .unwrap_or(defaults.video_root),
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            redis_url: std::env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            session_service_url: std::env::var("SESSION_SERVICE_URL")
                .unwrap_or(defaults.session_service_url),
            max_body_size: std::env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_body_size),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
        }
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }

    /// Callback URL the encoder pushes progress to. Always loopback; the
    /// ingestion endpoint rejects anything else.
    pub fn progress_callback_url(&self, video_id: &vidsite_models::VideoId) -> String {
        format!("http://127.0.0.1:{}/api/setprogress/{}", self.port, video_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidsite_models::VideoId;

    #[test]
    fn test_callback_url_is_loopback() {
        let config = ApiConfig::default();
        let url = config.progress_callback_url(&VideoId::from("Ab1-_"));
        assert_eq!(url, "http://127.0.0.1:5000/api/setprogress/Ab1-_");
    }
}
