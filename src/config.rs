// config.rs
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;

use crate::utils::render::Theme;

pub const DEFAULT_API_BASE_URL: &str = "https://hbe-production.up.railway.app/api";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub poll_interval: Duration,
    pub notification_ttl: Duration,
    pub http_timeout: Duration,
    pub session_file: PathBuf,
    pub theme: Theme,
}

impl Config {
    pub fn init() -> Config {
        let api_base_url = std::env::var("API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        let poll_interval = env_secs("POLL_INTERVAL_SECS", 20);
        let notification_ttl = env_secs("NOTIFICATION_TTL_SECS", 5);
        let http_timeout = env_secs("HTTP_TIMEOUT_SECS", 15);

        let session_file = std::env::var("SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_session_file());

        let theme = std::env::var("UI_THEME")
            .ok()
            .and_then(|raw| raw.parse::<Theme>().ok())
            .unwrap_or_default();

        Config {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            poll_interval,
            notification_ttl,
            http_timeout,
            session_file,
            theme,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            poll_interval: Duration::from_secs(20),
            notification_ttl: Duration::from_secs(5),
            http_timeout: Duration::from_secs(15),
            session_file: default_session_file(),
            theme: Theme::default(),
        }
    }
}

fn env_secs(key: &str, default: u64) -> Duration {
    let secs = std::env::var(key)
        .ok()
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(default);
    Duration::from_secs(secs)
}

fn default_session_file() -> PathBuf {
    ProjectDirs::from("", "", "homeman")
        .map(|dirs| dirs.data_dir().join("session.json"))
        .unwrap_or_else(|| PathBuf::from(".homeman-session.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_drops_trailing_slash() {
        let config = Config::default().with_base_url("http://localhost:5000/api/");
        assert_eq!(config.api_base_url, "http://localhost:5000/api");
    }

    #[test]
    fn defaults_match_page_timings() {
        let config = Config::default();
        assert_eq!(config.poll_interval, Duration::from_secs(20));
        assert_eq!(config.notification_ttl, Duration::from_secs(5));
    }
}
