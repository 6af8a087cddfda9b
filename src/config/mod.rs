//! Configuration management for dupfind
//!
//! Loads the strategy pipeline from a TOML file, applies profile and
//! environment overrides, and validates the result before use.

use crate::dedup::{DedupPipeline, Execution, PipelineStage, Strategy};
use crate::error::{DupfindError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

mod validator;

pub use validator::ConfigValidator;

/// Schema version written by this build
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "_meta")]
    pub meta: MetaConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    pub strategies: Vec<PipelineStage>,
    #[serde(default)]
    pub profiles: HashMap<String, ProfileOverrides>,
}

/// Metadata about the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaConfig {
    pub schema_version: String,
    #[serde(default = "current_timestamp")]
    pub created_at: String,
    #[serde(default = "current_timestamp")]
    pub last_modified: String,
}

fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Pipeline execution settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Run pairwise comparisons on the rayon thread pool
    #[serde(default)]
    pub parallel: bool,
}

/// Profile-specific configuration overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,
    /// Replaces the whole strategy list when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategies: Option<Vec<PipelineStage>>,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DupfindError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| DupfindError::Io {
            source: e,
            context: format!("Failed to read config file: {:?}", path),
        })?;
        let mut config: Config = toml::from_str(&content)?;

        // Apply environment variable overrides
        config.apply_env_overrides();

        ConfigValidator::validate(&config)?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| DupfindError::Io {
            source: e,
            context: format!("Failed to write config file: {:?}", path),
        })?;
        Ok(())
    }

    /// Load configuration with a specific profile applied
    pub fn load_with_profile(path: &Path, profile: &str) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_profile(profile)?;
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Apply a profile's overrides to the configuration
    pub fn apply_profile(&mut self, profile: &str) -> Result<()> {
        let overrides = self
            .profiles
            .get(profile)
            .cloned()
            .ok_or_else(|| DupfindError::Config(format!("Unknown profile: {}", profile)))?;

        if let Some(parallel) = overrides.parallel {
            self.pipeline.parallel = parallel;
        }
        if let Some(strategies) = overrides.strategies {
            self.strategies = strategies;
        }
        tracing::debug!("Applied profile '{}'", profile);
        Ok(())
    }

    /// Apply environment variable overrides
    /// Environment variables in format: DUPFIND_SECTION__KEY=value
    pub fn apply_env_overrides(&mut self) {
        for (key, value) in std::env::vars() {
            if let Some(config_key) = key.strip_prefix("DUPFIND_") {
                if let Err(e) = self.set_value_from_env(config_key, &value) {
                    tracing::warn!("Failed to apply env override {}: {}", key, e);
                }
            }
        }
    }

    fn set_value_from_env(&mut self, path: &str, value: &str) -> Result<()> {
        match path {
            "PIPELINE__PARALLEL" => {
                self.pipeline.parallel =
                    value.parse().map_err(|_| DupfindError::InvalidConfigValue {
                        path: path.to_string(),
                        message: format!("Cannot parse '{}' as boolean", value),
                    })?;
            }
            "VECTOR_SPACE__VOCABULARY_WARNING" => {
                let limit: usize = value.parse().map_err(|_| DupfindError::InvalidConfigValue {
                    path: path.to_string(),
                    message: format!("Cannot parse '{}' as integer", value),
                })?;
                for stage in &mut self.strategies {
                    if let Strategy::VectorSpace(s) = &mut stage.strategy {
                        s.vocabulary_warning = limit;
                    }
                }
            }
            _ => {
                tracing::debug!("Unknown env config key: {}", path);
            }
        }
        Ok(())
    }

    /// Build the strategy pipeline described by this configuration
    pub fn build_pipeline(&self) -> DedupPipeline {
        DedupPipeline::with_stages(
            self.strategies.clone(),
            Execution::from_parallel(self.pipeline.parallel),
        )
    }

    /// Get the default configuration file path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DupfindError::Config("Cannot determine config directory".to_string()))?;

        Ok(config_dir.join("dupfind").join("config.toml"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            meta: MetaConfig {
                schema_version: SCHEMA_VERSION.to_string(),
                created_at: current_timestamp(),
                last_modified: current_timestamp(),
            },
            pipeline: PipelineConfig::default(),
            strategies: Strategy::defaults()
                .into_iter()
                .map(PipelineStage::new)
                .collect(),
            profiles: HashMap::new(),
        }
    }
}
