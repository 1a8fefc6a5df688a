//! `config`: print the merged configuration.

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;

#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub config: Config,
    pub anthropic_api_key_set: bool,
    pub tavily_api_key_set: bool,
}

impl ConfigOutput {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            anthropic_api_key_set: config.model.resolve_api_key().is_some(),
            tavily_api_key_set: config.search.resolve_api_key().is_some(),
        }
    }
}

fn key_status(set: bool) -> &'static str {
    if set {
        "set"
    } else {
        "missing"
    }
}

impl CommandOutput for ConfigOutput {
    fn to_human(&self) -> String {
        let yaml = serde_yaml::to_string(&self.config)
            .unwrap_or_else(|e| format!("# failed to render config: {e}\n"));
        format!(
            "{yaml}\n# Anthropic API key: {}\n# Tavily API key: {}",
            key_status(self.anthropic_api_key_set),
            key_status(self.tavily_api_key_set)
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(config: &Config, json_mode: bool) -> Result<()> {
    output(&ConfigOutput::new(config), json_mode);
    Ok(())
}
