use crate::error::ConfigError;
use crate::game::GuessPolicy;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration, loaded from `config.toml`.
///
/// Every field has a serde default so a missing or partial file still yields
/// a runnable config; only the credential has no default and is resolved
/// from the environment when absent here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gemini API key. Falls back to `GEMINI_API_KEY` / `GOOGLE_API_KEY`.
    pub api_key: Option<String>,

    /// Model identifier passed to the reasoning service.
    pub model: String,

    /// Guessing policy enforced server-side each turn.
    pub policy: GuessPolicy,

    /// Generation parameters forwarded to the reasoning service.
    pub sampling: SamplingConfig,

    pub gateway: GatewayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub max_output_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.0-flash".to_string(),
            policy: GuessPolicy::default(),
            sampling: SamplingConfig::default(),
            gateway: GatewayConfig::default(),
        }
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 1024,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3090,
        }
    }
}

impl Config {
    /// Load from `AKIN_CONFIG`, or the platform config dir, or fall back to
    /// defaults when no file exists.
    pub fn load_or_init() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var("AKIN_CONFIG") {
            return Self::load_from(Path::new(&path));
        }

        match Self::default_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::Load(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "akin").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.policy.confidence_threshold) {
            return Err(ConfigError::Validation(format!(
                "policy.confidence_threshold must be in [0, 1], got {}",
                self.policy.confidence_threshold
            )));
        }
        if self.policy.min_questions == 0 {
            return Err(ConfigError::Validation(
                "policy.min_questions must be at least 1".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.sampling.temperature) {
            return Err(ConfigError::Validation(format!(
                "sampling.temperature must be in [0, 2], got {}",
                self.sampling.temperature
            )));
        }
        if !(0.0..=1.0).contains(&self.sampling.top_p) {
            return Err(ConfigError::Validation(format!(
                "sampling.top_p must be in [0, 1], got {}",
                self.sampling.top_p
            )));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::Validation("model must not be empty".to_string()));
        }
        Ok(())
    }
}
