use anyhow::{ensure, Context, Result};
use chrono::TimeDelta;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::graph::store::{DEFAULT_CO_OCCURRENCE_WINDOW_MINUTES, DEFAULT_MEAL_WINDOW_MINUTES};
use crate::graph::GraphSettings;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct NutriGraphConfig {
    pub server: ServerConfig,
    pub correlation: CorrelationConfig,
    pub insight: InsightConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CorrelationConfig {
    /// How long after a meal a symptom log still counts as "near" it.
    pub window_minutes: i64,
    pub co_occurrence_window_minutes: i64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct InsightConfig {
    /// Correlated ingredients handed to the synthesis model.
    pub top_n: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
        }
    }
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            window_minutes: DEFAULT_MEAL_WINDOW_MINUTES,
            co_occurrence_window_minutes: DEFAULT_CO_OCCURRENCE_WINDOW_MINUTES,
        }
    }
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self { top_n: 5 }
    }
}

impl CorrelationConfig {
    /// Windows as [`GraphSettings`]; fails when a window does not fit a [`TimeDelta`].
    pub fn graph_settings(&self) -> Result<GraphSettings> {
        let meal_window = TimeDelta::try_minutes(self.window_minutes).with_context(|| {
            format!("correlation.window_minutes out of range: {}", self.window_minutes)
        })?;
        let co_occurrence_window = TimeDelta::try_minutes(self.co_occurrence_window_minutes)
            .with_context(|| {
                format!(
                    "correlation.co_occurrence_window_minutes out of range: {}",
                    self.co_occurrence_window_minutes
                )
            })?;
        Ok(GraphSettings::default()
            .with_meal_window(meal_window)
            .with_co_occurrence_window(co_occurrence_window))
    }
}

/// Returns `~/.nutrigraph/`
pub fn default_nutrigraph_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(".nutrigraph")
}

/// Returns the config file path: `$NUTRIGRAPH_CONFIG` or `~/.nutrigraph/config.toml`.
pub fn default_config_path() -> PathBuf {
    std::env::var_os("NUTRIGRAPH_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| default_nutrigraph_dir().join("config.toml"))
}

impl NutriGraphConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            NutriGraphConfig::default()
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides (NUTRIGRAPH_LOG_LEVEL, NUTRIGRAPH_WINDOW_MINUTES).
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("NUTRIGRAPH_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var("NUTRIGRAPH_WINDOW_MINUTES") {
            self.correlation.window_minutes = val
                .trim()
                .parse()
                .with_context(|| format!("NUTRIGRAPH_WINDOW_MINUTES is not a number: {val}"))?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.correlation.window_minutes > 0,
            "correlation.window_minutes must be positive, got {}",
            self.correlation.window_minutes
        );
        ensure!(
            self.correlation.co_occurrence_window_minutes >= 0,
            "correlation.co_occurrence_window_minutes must not be negative"
        );
        ensure!(self.insight.top_n > 0, "insight.top_n must be at least 1");
        self.correlation.graph_settings()?;
        Ok(())
    }
}
