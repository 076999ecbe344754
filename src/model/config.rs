use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

const ENV_CONFIG_PATH: &str = "CONTRACT_REVIEW_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const ENV_LLM_TIMEOUT_SECS: &str = "LLM_TIMEOUT_SECS";
const ENV_LLM_MAX_RETRIES: &str = "LLM_MAX_RETRIES";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_RETRIES: u32 = 2;

/// Model-call resilience settings.
///
/// Every model invocation is a remote call from the pipeline's point of view,
/// so it always carries an explicit timeout and a bounded retry budget.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl LlmConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub llm: Option<LlmConfig>,
}

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub llm: LlmConfig,
}

impl Config {
    /// Load configuration from environment and config file.
    ///
    /// Environment variables win over the YAML file, which wins over the
    /// built-in defaults.
    pub fn from_env() -> Self {
        let config_path =
            std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mut llm = Self::load_config_file(&config_path)
            .and_then(|cf| cf.llm)
            .unwrap_or_default();

        if let Some(secs) = std::env::var(ENV_LLM_TIMEOUT_SECS)
            .ok()
            .and_then(|v| v.parse().ok())
        {
            llm.timeout_secs = secs;
        }
        if let Some(retries) = std::env::var(ENV_LLM_MAX_RETRIES)
            .ok()
            .and_then(|v| v.parse().ok())
        {
            llm.max_retries = retries;
        }

        Self { llm }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => {
                let contents = contents.trim();
                if contents.is_empty() {
                    tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
                    return Some(ConfigFile::default());
                }

                match serde_yaml::from_str(contents) {
                    Ok(config) => {
                        tracing::info!(path = %path.display(), "Loaded configuration from file");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                        None
                    }
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_file_or_env() {
        let config = Config::default();
        assert_eq!(config.llm.timeout_secs, 30);
        assert_eq!(config.llm.max_retries, 2);
    }

    #[test]
    fn yaml_overrides_defaults_field_by_field() {
        let cf: ConfigFile = serde_yaml::from_str("llm:\n  timeout_secs: 5\n").unwrap();
        let llm = cf.llm.unwrap();
        assert_eq!(llm.timeout_secs, 5);
        assert_eq!(llm.max_retries, 2);
    }
}
