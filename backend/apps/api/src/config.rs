//! Server configuration from environment variables

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use insight::InsightConfig;
use leaderboard::LeaderboardConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

/// Value of `LEADERBOARD_DATA_DIR` that keeps everything in process memory
pub const MEMORY_DATA_DIR: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageMode {
    File(PathBuf),
    Memory,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub storage: StorageMode,
    pub frontend_origins: Vec<String>,
    pub leaderboard: LeaderboardConfig,
    pub insight: InsightConfig,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset and blank values fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = get("LEADERBOARD_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("LEADERBOARD_BIND_ADDR must be a socket address")?;

        let storage = match get("LEADERBOARD_DATA_DIR") {
            Some(dir) if dir.trim() == MEMORY_DATA_DIR => StorageMode::Memory,
            Some(dir) => StorageMode::File(PathBuf::from(dir)),
            None => StorageMode::File(PathBuf::from(DEFAULT_DATA_DIR)),
        };

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let mut leaderboard = LeaderboardConfig::default();
        if let Some(ms) = get("LEADERBOARD_COOLDOWN_MS") {
            let ms: u64 = ms
                .trim()
                .parse()
                .context("LEADERBOARD_COOLDOWN_MS must be an integer")?;
            leaderboard.cooldown = Duration::from_millis(ms);
        }
        if let Some(limit) = get("LEADERBOARD_LIMIT") {
            leaderboard.leaderboard_limit = limit
                .trim()
                .parse()
                .context("LEADERBOARD_LIMIT must be an integer")?;
        }

        let mut insight = InsightConfig {
            api_key: get("GEMINI_API_KEY").or_else(|| get("API_KEY")),
            ..InsightConfig::default()
        };
        if let Some(model) = get("GEMINI_MODEL") {
            insight.model = model.trim().to_string();
        }
        if let Some(ms) = get("INSIGHT_TIMEOUT_MS") {
            let ms: u64 = ms
                .trim()
                .parse()
                .context("INSIGHT_TIMEOUT_MS must be an integer")?;
            insight.timeout = Duration::from_millis(ms);
        }

        Ok(Self {
            bind_addr,
            storage,
            frontend_origins,
            leaderboard,
            insight,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<ApiConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr.port(), 31113);
        assert_eq!(config.storage, StorageMode::File(PathBuf::from("./data")));
        assert_eq!(config.frontend_origins.len(), 2);
        assert_eq!(config.leaderboard.cooldown, Duration::from_millis(2000));
        assert!(!config.insight.has_api_key());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("LEADERBOARD_BIND_ADDR", "127.0.0.1:8080"),
            ("LEADERBOARD_DATA_DIR", ":memory:"),
            ("LEADERBOARD_COOLDOWN_MS", "500"),
            ("LEADERBOARD_LIMIT", "10"),
            ("API_KEY", "secret"),
            ("GEMINI_MODEL", "gemini-2.5-flash"),
            ("INSIGHT_TIMEOUT_MS", "1500"),
            ("FRONTEND_ORIGINS", "https://a.example, ,https://b.example"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.storage, StorageMode::Memory);
        assert_eq!(config.leaderboard.cooldown, Duration::from_millis(500));
        assert_eq!(config.leaderboard.leaderboard_limit, 10);
        assert_eq!(config.insight.api_key.as_deref(), Some("secret"));
        assert_eq!(config.insight.model, "gemini-2.5-flash");
        assert_eq!(config.insight.timeout, Duration::from_millis(1500));
        assert_eq!(
            config.frontend_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn test_gemini_key_wins_over_alias() {
        let config = config_from(&[("GEMINI_API_KEY", "primary"), ("API_KEY", "alias")]).unwrap();
        assert_eq!(config.insight.api_key.as_deref(), Some("primary"));
    }

    #[test]
    fn test_invalid_values() {
        assert!(config_from(&[("LEADERBOARD_BIND_ADDR", "nowhere")]).is_err());
        assert!(config_from(&[("LEADERBOARD_COOLDOWN_MS", "-1")]).is_err());
    }
}
