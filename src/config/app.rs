//! Main application configuration
//!
//! This module defines the top-level configuration for the team balancing
//! engine, including TOML file loading, environment variable overrides and
//! validation.

use crate::config::balance::BalanceConfig;
use crate::config::rating::RatingConfig;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub rating: RatingConfig,
    pub balance: BalanceConfig,
    pub selection: SelectionSettings,
    pub years: YearSettings,
}

/// Service-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Selection rules enforced before balancing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionSettings {
    /// Exact number of players (both teams together) needed to generate teams
    pub players_required: usize,
}

/// Rules for which years are offered as the "current year"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YearSettings {
    /// Below this many matches the newest year is considered too thin
    pub min_current_year_matches: usize,
    /// The previous year needs at least this many matches to be offered
    pub min_matches_for_year_option: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "pickup-teams".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for SelectionSettings {
    fn default() -> Self {
        Self {
            players_required: 10,
        }
    }
}

impl Default for YearSettings {
    fn default() -> Self {
        Self {
            min_current_year_matches: 5,
            min_matches_for_year_option: 6,
        }
    }
}

/// Parse an environment variable into `target` when it is set
fn env_override<T: FromStr>(key: &str, target: &mut T) -> Result<()> {
    if let Ok(value) = env::var(key) {
        *target = value
            .parse()
            .map_err(|_| anyhow!("Invalid {} value: {}", key, value))?;
    }
    Ok(())
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config = Self::from_toml_str(&contents)?;
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: AppConfig =
            toml::from_str(contents).map_err(|e| anyhow!("Invalid configuration: {}", e))?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        env_override("SERVICE_NAME", &mut self.service.name)?;
        env_override("LOG_LEVEL", &mut self.service.log_level)?;

        // Rating settings
        let weights = &mut self.rating.weights;
        env_override("OVERALL_WEIGHT", &mut weights.overall_weight)?;
        env_override("OVERALL_ENABLED", &mut weights.overall_enabled)?;
        env_override("CURRENT_YEAR_WEIGHT", &mut weights.current_year_weight)?;
        env_override("CURRENT_YEAR_ENABLED", &mut weights.current_year_enabled)?;
        env_override("FORM_WEIGHT", &mut weights.form_weight)?;
        env_override("FORM_ENABLED", &mut weights.form_enabled)?;
        env_override(
            "MIN_MATCHES_FOR_CONFIDENCE",
            &mut self.rating.min_matches_for_confidence,
        )?;
        env_override("GUEST_CONFIDENCE", &mut self.rating.guest_confidence)?;

        // Balancing and selection settings
        env_override("MAX_ITERATIONS", &mut self.balance.max_iterations)?;
        env_override("IMPROVEMENT_EPSILON", &mut self.balance.improvement_epsilon)?;
        env_override("GOOD_THRESHOLD", &mut self.balance.good_threshold)?;
        env_override("ACCEPTABLE_THRESHOLD", &mut self.balance.acceptable_threshold)?;
        env_override("PLAYERS_REQUIRED", &mut self.selection.players_required)?;

        // Year options
        env_override(
            "MIN_CURRENT_YEAR_MATCHES",
            &mut self.years.min_current_year_matches,
        )?;
        env_override(
            "MIN_MATCHES_FOR_YEAR_OPTION",
            &mut self.years.min_matches_for_year_option,
        )?;

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.selection.players_required < 2 {
        return Err(anyhow!("players_required must be at least 2"));
    }

    config.rating.validate()?;
    config.balance.validate()?;

    Ok(())
}
