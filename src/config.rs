use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Application configuration loaded from ~/.config/releasepost/config.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub oracle: OracleConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub post: PostConfig,
    /// Extra language synonyms, e.g. `castellano = "esp"`
    #[serde(default)]
    pub languages: BTreeMap<String, String>,
}

/// Metadata catalog (TMDb) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub image_base_url: String,
    /// Language tried first, also used for the final details fetch
    pub primary_language: String,
    /// Language tried when the primary one yields no confident match
    pub secondary_language: String,
    pub timeout_secs: u64,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.themoviedb.org/3".to_string(),
            image_base_url: "https://image.tmdb.org/t/p/w500".to_string(),
            primary_language: "es-ES".to_string(),
            secondary_language: "en-US".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Text oracle (Gemini) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-1.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Title matching policy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Minimum similarity a candidate must strictly exceed (0.0 - 1.0)
    pub threshold: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
        }
    }
}

fn default_threshold() -> f64 {
    0.75
}

/// Post assembly settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PostConfig {
    /// Quality label used when neither caption nor filename names one
    pub default_quality: String,
    /// Synopsis link used when no article was published
    pub synopsis_fallback_url: String,
    /// Hashtag label for movies
    pub movie_label: String,
    /// Hashtag label for series
    pub series_label: String,
    /// Optional template files replacing the built-in ones
    pub movie_template: Option<PathBuf>,
    pub season_template: Option<PathBuf>,
    pub episode_template: Option<PathBuf>,
}

impl Default for PostConfig {
    fn default() -> Self {
        Self {
            default_quality: "WEB-DL".to_string(),
            synopsis_fallback_url: "https://telegra.ph/".to_string(),
            movie_label: "Película".to_string(),
            series_label: "Serie".to_string(),
            movie_template: None,
            season_template: None,
            episode_template: None,
        }
    }
}

impl Config {
    /// Load configuration from the CLI path or the default path, then
    /// apply environment overrides
    pub fn load(cli_override: Option<&Path>) -> Result<Self> {
        let path = match cli_override {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };
        let mut config = Self::load_from(&path)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;

        toml::from_str(&content).with_context(|| format!("Failed to parse {:?}", path))
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("releasepost").join("config.toml"))
    }

    /// `TMDB_API_KEY` / `GEMINI_API_KEY` take precedence over the file
    fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("TMDB_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.tmdb.api_key = Some(key);
        }
        if let Some(key) = lookup("GEMINI_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.oracle.api_key = Some(key);
        }
    }

    /// Threshold clamped into the valid ratio range
    pub fn threshold(&self) -> f64 {
        if self.matching.threshold.is_finite() {
            self.matching.threshold.clamp(0.0, 1.0)
        } else {
            default_threshold()
        }
    }
}
