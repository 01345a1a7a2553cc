//! Application Configuration
//!
//! User settings stored in TOML format. Defaults reproduce the shipped
//! behavior exactly; the thresholds exist so a host can tune them without a
//! rebuild.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::detect::DEFAULT_CONFIDENCE_THRESHOLD;
use crate::recipes::{
    RankingConfig, DEFAULT_QUICK_BONUS, DEFAULT_QUICK_MINUTES, DEFAULT_RESULT_LIMIT,
};

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Pipeline thresholds
    pub thresholds: ThresholdSettings,
    /// Recipe catalog source
    pub catalog: CatalogSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            thresholds: ThresholdSettings::default(),
            catalog: CatalogSettings::default(),
        }
    }
}

/// Tunable pipeline thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdSettings {
    /// Minimum classifier confidence for a detection to enter the pipeline
    pub confidence_threshold: f32,
    /// Flat score bonus for quick recipes
    pub quick_bonus: f64,
    /// Minutes at or below which a recipe counts as quick
    pub quick_minutes: u32,
    /// Maximum number of ranked recipes returned
    pub max_results: usize,
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            quick_bonus: DEFAULT_QUICK_BONUS,
            quick_minutes: DEFAULT_QUICK_MINUTES,
            max_results: DEFAULT_RESULT_LIMIT,
        }
    }
}

impl ThresholdSettings {
    /// Ranking knobs derived from these settings.
    pub fn ranking_config(&self) -> RankingConfig {
        RankingConfig {
            quick_minutes: self.quick_minutes,
            quick_bonus: self.quick_bonus,
            limit: self.max_results,
        }
    }
}

/// Recipe catalog settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Path to a JSON catalog replacing the built-in one
    pub path: Option<PathBuf>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self { path: None }
    }
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "snapcook", "SnapCook")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    let config_dir = proj_dirs.config_dir().to_path_buf();
    std::fs::create_dir_all(&config_dir)?;

    Ok(config_dir)
}
