/// Configuration management for community-feed
///
/// Settings come from environment variables, optionally seeded from a `.env`
/// file. Every value has a default so an empty environment yields a working
/// configuration.
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::SortMode;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// Trending score parameters
    pub ranking: RankingConfig,
    /// Feed view defaults
    pub feed: FeedConfig,
    /// Share link settings
    pub share: ShareConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Default tracing filter when RUST_LOG is unset
    pub log_level: String,
}

/// Trending score parameters.
///
/// `score = net / (age_hours + trending_offset_hours) ^ trending_exponent`.
/// A larger exponent makes scores decay faster, favouring recent posts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    #[serde(default = "default_trending_exponent")]
    pub trending_exponent: f64,
    #[serde(default = "default_trending_offset_hours")]
    pub trending_offset_hours: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            trending_exponent: default_trending_exponent(),
            trending_offset_hours: default_trending_offset_hours(),
        }
    }
}

impl RankingConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.trending_offset_hours.is_finite() || self.trending_offset_hours <= 0.0 {
            return Err(AppError::Validation(format!(
                "trending_offset_hours must be a positive number, got {}",
                self.trending_offset_hours
            )));
        }
        if !self.trending_exponent.is_finite() || self.trending_exponent < 0.0 {
            return Err(AppError::Validation(format!(
                "trending_exponent must be a non-negative number, got {}",
                self.trending_exponent
            )));
        }
        Ok(())
    }
}

/// Feed view defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedConfig {
    pub default_sort: SortMode,
}

/// Share link settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Post links are `{link_base_url}/{post_id}`
    pub link_base_url: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            link_base_url: default_share_base_url(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app: AppConfig {
                env: "development".to_string(),
                log_level: "info".to_string(),
            },
            ranking: RankingConfig::default(),
            feed: FeedConfig::default(),
            share: ShareConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let ranking = envy::prefixed("FEED_RANKING_").from_env::<RankingConfig>()?;
        ranking.validate()?;

        let default_sort = match std::env::var("FEED_DEFAULT_SORT") {
            Ok(value) => value.parse::<SortMode>().map_err(|e| {
                AppError::Config(format!("Failed to parse FEED_DEFAULT_SORT='{}': {}", value, e))
            })?,
            Err(_) => SortMode::default(),
        };

        let link_base_url = std::env::var("SHARE_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| default_share_base_url());
        if link_base_url.is_empty() {
            return Err(AppError::Config("SHARE_BASE_URL must not be empty".to_string()));
        }

        Ok(Config {
            app: AppConfig {
                env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            ranking,
            feed: FeedConfig { default_sort },
            share: ShareConfig { link_base_url },
        })
    }
}

fn default_trending_exponent() -> f64 {
    1.8
}

fn default_trending_offset_hours() -> f64 {
    2.0
}

fn default_share_base_url() -> String {
    "http://localhost:8081/posts".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 5] = [
        "FEED_RANKING_TRENDING_EXPONENT",
        "FEED_RANKING_TRENDING_OFFSET_HOURS",
        "FEED_DEFAULT_SORT",
        "SHARE_BASE_URL",
        "APP_ENV",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = Config::from_env().unwrap();
        assert_eq!(config.ranking, RankingConfig::default());
        assert_eq!(config.ranking.trending_exponent, 1.8);
        assert_eq!(config.ranking.trending_offset_hours, 2.0);
        assert_eq!(config.feed.default_sort, SortMode::Newest);
        assert_eq!(config.share.link_base_url, "http://localhost:8081/posts");
        assert_eq!(config.app.env, "development");
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("FEED_RANKING_TRENDING_EXPONENT", "1.5");
        std::env::set_var("FEED_RANKING_TRENDING_OFFSET_HOURS", "3");
        std::env::set_var("FEED_DEFAULT_SORT", "trending");
        std::env::set_var("SHARE_BASE_URL", "https://feed.example.org/p/");

        let config = Config::from_env().unwrap();
        assert_eq!(config.ranking.trending_exponent, 1.5);
        assert_eq!(config.ranking.trending_offset_hours, 3.0);
        assert_eq!(config.feed.default_sort, SortMode::Trending);
        assert_eq!(config.share.link_base_url, "https://feed.example.org/p");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_bad_values() {
        clear_env();
        std::env::set_var("FEED_RANKING_TRENDING_OFFSET_HOURS", "soon");
        assert!(matches!(Config::from_env(), Err(AppError::Config(_))));

        clear_env();
        std::env::set_var("FEED_RANKING_TRENDING_OFFSET_HOURS", "0");
        assert!(matches!(Config::from_env(), Err(AppError::Validation(_))));

        clear_env();
        std::env::set_var("FEED_DEFAULT_SORT", "hot");
        assert!(matches!(Config::from_env(), Err(AppError::Config(_))));
        clear_env();
    }

    #[test]
    fn test_ranking_config_validation() {
        assert!(RankingConfig::default().validate().is_ok());
        let zero_exponent = RankingConfig {
            trending_exponent: 0.0,
            ..RankingConfig::default()
        };
        assert!(zero_exponent.validate().is_ok());
        let negative = RankingConfig {
            trending_exponent: -1.0,
            ..RankingConfig::default()
        };
        assert!(negative.validate().is_err());
        let nan_offset = RankingConfig {
            trending_offset_hours: f64::NAN,
            ..RankingConfig::default()
        };
        assert!(nan_offset.validate().is_err());
    }
}
