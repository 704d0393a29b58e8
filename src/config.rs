use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, Result};

const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_db_path")]
    pub db_path: String,

    pub anthropic_api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_retention_days")]
    pub cache_retention_days: i64,

    #[serde(default = "default_transcripts_dir")]
    pub transcripts_dir: String,

    #[serde(default = "default_max_questions")]
    pub max_questions: usize,

    #[serde(default)]
    pub chunking: ChunkingConfig,
}

/// Character-length breakpoints for chunk counts.
///
/// Content shorter than `thresholds[0]` is never split; each breakpoint it
/// reaches adds one chunk, so five breakpoints give at most six chunks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkingConfig {
    pub thresholds: Vec<usize>,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            thresholds: vec![5_000, 15_000, 30_000, 50_000, 80_000],
        }
    }
}

fn data_dir() -> PathBuf {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("quiz-forge");
    std::fs::create_dir_all(&data_dir).ok();
    data_dir
}

fn default_db_path() -> String {
    data_dir().join("cache.db").to_string_lossy().to_string()
}

fn default_transcripts_dir() -> String {
    data_dir().join("transcripts").to_string_lossy().to_string()
}

fn default_model() -> String {
    "claude-3-5-haiku-20241022".to_string()
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_request_timeout() -> u64 {
    120
}

fn default_retention_days() -> i64 {
    7
}

fn default_max_questions() -> usize {
    50
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            anthropic_api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            request_timeout_secs: default_request_timeout(),
            cache_retention_days: default_retention_days(),
            transcripts_dir: default_transcripts_dir(),
            max_questions: default_max_questions(),
            chunking: ChunkingConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str::<Config>(&content)?
        } else {
            let config = Config::default();
            config.save()?;
            config
        };

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                config.anthropic_api_key = Some(key);
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("quiz-forge")
            .join("config.toml")
    }

    pub fn retention(&self) -> chrono::Duration {
        chrono::Duration::days(self.cache_retention_days)
    }

    fn validate(&self) -> Result<()> {
        if self.cache_retention_days <= 0 {
            return Err(AppError::Config(
                "cache_retention_days must be positive".to_string(),
            ));
        }
        if self.chunking.thresholds.is_empty() {
            return Err(AppError::Config(
                "chunking.thresholds must contain at least one breakpoint".to_string(),
            ));
        }
        if self.chunking.thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(AppError::Config(
                "chunking.thresholds must be strictly increasing".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let config: Config = toml::from_str("model = \"claude-test\"\n").unwrap();
        assert_eq!(config.model, "claude-test");
        assert_eq!(config.cache_retention_days, 7);
        assert_eq!(config.max_questions, 50);
        assert_eq!(config.chunking, ChunkingConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_unordered_thresholds() {
        let config = Config {
            chunking: ChunkingConfig {
                thresholds: vec![5_000, 4_000],
            },
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn rejects_non_positive_retention() {
        let config = Config {
            cache_retention_days: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
