use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Directory holding project-local configuration
pub const CONFIG_DIR: &str = ".campaign-crew";

/// Prefix for environment overrides, e.g. `CAMPAIGN_CREW_WORKFLOW__MAX_STEPS=20`
pub const ENV_PREFIX: &str = "CAMPAIGN_CREW_";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const VALID_LOG_FORMATS: [&str; 2] = ["json", "pretty"];
const VALID_ROTATIONS: [&str; 3] = ["daily", "hourly", "never"];
const VALID_SEARCH_DEPTHS: [&str; 2] = ["basic", "advanced"];

/// Configuration error types
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid max_steps: {0}. Must be at least 1")]
    InvalidMaxSteps(usize),

    #[error("Invalid max_tool_rounds: {0}. Must be at least 1")]
    InvalidMaxToolRounds(u32),

    #[error("Invalid max_retries: {0}. Must be at most 10")]
    InvalidMaxRetries(u32),

    #[error(
        "Invalid backoff configuration: initial_backoff_ms ({0}) must not exceed max_backoff_ms ({1})"
    )]
    InvalidBackoff(u64, u64),

    #[error("Invalid rate limit: {0}. Must be positive")]
    InvalidRateLimit(f64),

    #[error("Invalid temperature: {0}. Must be between 0.0 and 1.0")]
    InvalidTemperature(f32),

    #[error("Invalid max_tokens: {0}. Must be at least 1")]
    InvalidMaxTokens(u32),

    #[error("Model name cannot be empty")]
    EmptyModel,

    #[error("Invalid search max_results: {0}. Must be between 1 and 20")]
    InvalidMaxResults(u32),

    #[error("Invalid search depth: {0}. Must be one of: basic, advanced")]
    InvalidSearchDepth(String),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .campaign-crew/config.yaml (project config)
    /// 3. .campaign-crew/local.yaml (project local overrides, optional)
    /// 4. Environment variables (CAMPAIGN_CREW_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        Self::load_with(None)
    }

    /// Like [`ConfigLoader::load`], with an extra file merged after the
    /// project files and before the environment.
    pub fn load_with(extra: Option<&Path>) -> Result<Config> {
        let mut figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(Path::new(CONFIG_DIR).join("config.yaml")))
            .merge(Yaml::file(Path::new(CONFIG_DIR).join("local.yaml")));

        if let Some(path) = extra {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }

        let config: Config = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, ignoring project files and environment
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.as_ref().display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.workflow.max_steps == 0 {
            return Err(ConfigError::InvalidMaxSteps(config.workflow.max_steps));
        }

        if config.workflow.max_tool_rounds == 0 {
            return Err(ConfigError::InvalidMaxToolRounds(
                config.workflow.max_tool_rounds,
            ));
        }

        if config.retry.max_retries > 10 {
            return Err(ConfigError::InvalidMaxRetries(config.retry.max_retries));
        }

        if config.retry.initial_backoff_ms > config.retry.max_backoff_ms {
            return Err(ConfigError::InvalidBackoff(
                config.retry.initial_backoff_ms,
                config.retry.max_backoff_ms,
            ));
        }

        let rps = config.rate_limit.requests_per_second;
        if rps.is_nan() || rps <= 0.0 {
            return Err(ConfigError::InvalidRateLimit(
                config.rate_limit.requests_per_second,
            ));
        }

        if config.model.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }

        if !(0.0..=1.0).contains(&config.model.temperature) {
            return Err(ConfigError::InvalidTemperature(config.model.temperature));
        }

        if config.model.max_tokens == 0 {
            return Err(ConfigError::InvalidMaxTokens(config.model.max_tokens));
        }

        if !(1..=20).contains(&config.search.max_results) {
            return Err(ConfigError::InvalidMaxResults(config.search.max_results));
        }

        if !VALID_SEARCH_DEPTHS.contains(&config.search.search_depth.as_str()) {
            return Err(ConfigError::InvalidSearchDepth(
                config.search.search_depth.clone(),
            ));
        }

        if !VALID_LOG_LEVELS.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        if !VALID_LOG_FORMATS.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        if !VALID_ROTATIONS.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(
                config.logging.rotation.clone(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn yaml_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.workflow.max_steps, 50);
        assert_eq!(config.retry.max_retries, 2);
        assert_eq!(config.search.max_results, 2);
        assert!(config.model.temperature.abs() < f32::EPSILON);
        assert_eq!(config.server.port, 8501);
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
model:
  model: claude-haiku-4-5
  temperature: 0.3
workflow:
  max_steps: 12
search:
  max_results: 4
logging:
  level: debug
  format: json
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.model.model, "claude-haiku-4-5");
        assert!((config.model.temperature - 0.3).abs() < f32::EPSILON);
        assert_eq!(config.workflow.max_steps, 12);
        assert_eq!(config.workflow.max_tool_rounds, 5);
        assert_eq!(config.search.max_results, 4);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_api_keys_never_serialized() {
        let mut config = Config::default();
        config.model.api_key = Some("sk-ant-secret".to_string());
        config.search.api_key = Some("tvly-secret".to_string());

        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(!yaml.contains("sk-ant-secret"));
        assert!(!yaml.contains("tvly-secret"));
    }

    #[test]
    fn test_validate_zero_max_steps() {
        let mut config = Config::default();
        config.workflow.max_steps = 0;

        assert_eq!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidMaxSteps(0))
        );
    }

    #[test]
    fn test_validate_zero_tool_rounds() {
        let mut config = Config::default();
        config.workflow.max_tool_rounds = 0;

        assert_eq!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidMaxToolRounds(0))
        );
    }

    #[test]
    fn test_validate_retry_bounds() {
        let mut config = Config::default();
        config.retry.max_retries = 0;
        assert!(ConfigLoader::validate(&config).is_ok(), "0 disables retries");

        config.retry.max_retries = 11;
        assert_eq!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidMaxRetries(11))
        );
    }

    #[test]
    fn test_validate_invalid_backoff() {
        let mut config = Config::default();
        config.retry.initial_backoff_ms = 30000;
        config.retry.max_backoff_ms = 10000;

        assert_eq!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidBackoff(30000, 10000))
        );
    }

    #[test]
    fn test_validate_rate_limit() {
        let mut config = Config::default();
        config.rate_limit.requests_per_second = 0.0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidRateLimit(_))
        ));

        config.rate_limit.requests_per_second = f64::NAN;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidRateLimit(_))
        ));
    }

    #[test]
    fn test_validate_accepts_fractional_rate_limit() {
        let mut config = Config::default();
        for rps in [0.5, 0.1, 2.5] {
            config.rate_limit.requests_per_second = rps;
            assert_eq!(ConfigLoader::validate(&config), Ok(()), "rps {rps}");
        }
    }

    #[test]
    fn test_validate_model_settings() {
        let mut config = Config::default();
        config.model.temperature = 1.5;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidTemperature(_))
        ));

        let mut config = Config::default();
        config.model.model = "  ".to_string();
        assert_eq!(ConfigLoader::validate(&config), Err(ConfigError::EmptyModel));

        let mut config = Config::default();
        config.model.max_tokens = 0;
        assert_eq!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidMaxTokens(0))
        );
    }

    #[test]
    fn test_validate_search_settings() {
        let mut config = Config::default();
        config.search.max_results = 0;
        assert_eq!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidMaxResults(0))
        );

        let mut config = Config::default();
        config.search.search_depth = "deep".to_string();
        assert_eq!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidSearchDepth("deep".to_string()))
        );
    }

    #[test]
    fn test_validate_logging_settings() {
        let mut config = Config::default();
        config.logging.level = "invalid".to_string();
        assert_eq!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogLevel("invalid".to_string()))
        );

        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert_eq!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogFormat("xml".to_string()))
        );

        let mut config = Config::default();
        config.logging.rotation = "weekly".to_string();
        assert_eq!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidRotation("weekly".to_string()))
        );
    }

    #[test]
    fn test_load_from_file() {
        let file = yaml_file("workflow:\n  max_steps: 7\nserver:\n  port: 9000\n");

        let config = ConfigLoader::load_from_file(file.path()).unwrap();
        assert_eq!(config.workflow.max_steps, 7);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_load_from_file_rejects_invalid_values() {
        let file = yaml_file("workflow:\n  max_steps: 0\n");

        let err = ConfigLoader::load_from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("max_steps"));
    }

    #[test]
    fn test_load_with_missing_extra_file() {
        let result = ConfigLoader::load_with(Some(Path::new("/nonexistent/crew.yaml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_env_overrides_file() {
        let file = yaml_file("workflow:\n  max_steps: 7\nlogging:\n  level: info\n");

        temp_env::with_vars(
            [
                ("CAMPAIGN_CREW_WORKFLOW__MAX_STEPS", Some("21")),
                ("CAMPAIGN_CREW_SEARCH__MAX_RESULTS", Some("3")),
            ],
            || {
                let config = ConfigLoader::load_with(Some(file.path())).unwrap();
                assert_eq!(config.workflow.max_steps, 21, "Env should win over file");
                assert_eq!(config.search.max_results, 3);
                assert_eq!(
                    config.logging.level, "info",
                    "File value should persist when env does not override it"
                );
            },
        );
    }

    #[test]
    fn test_hierarchical_merging() {
        let base_file = yaml_file("workflow:\n  max_steps: 5\nlogging:\n  level: info\n  format: json\n");
        let override_file = yaml_file("workflow:\n  max_steps: 15\nlogging:\n  level: debug\n");

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(base_file.path()))
            .merge(Yaml::file(override_file.path()))
            .extract()
            .unwrap();

        assert_eq!(config.workflow.max_steps, 15, "Override should win");
        assert_eq!(
            config.logging.level, "debug",
            "Override should win for nested fields"
        );
        assert_eq!(
            config.logging.format, "json",
            "Base value should persist when not overridden"
        );
    }
}
