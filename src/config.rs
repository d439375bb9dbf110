//! Environment-driven generator settings.
//!
//! Credentials and model overrides come from the environment so an
//! unconfigured binary can still parse arguments and report status; the run
//! itself fails with a pointed hint when the chosen backend has no key.

use crate::lm::Provider;
use anyhow::{anyhow, Context, Result};
use std::env;

pub const OPENROUTER_KEY_VAR: &str = "OPENROUTER_API_KEY";
pub const GEMINI_KEY_VAR: &str = "GEMINI_API_KEY";

const OPENROUTER_MODEL_VAR: &str = "PAGESMITH_OPENROUTER_MODEL";
const GEMINI_MODEL_VAR: &str = "PAGESMITH_GEMINI_MODEL";
const MAX_PASSES_VAR: &str = "PAGESMITH_MAX_PASSES";
const TIMEOUT_VAR: &str = "PAGESMITH_TIMEOUT_SECS";

const DEFAULT_OPENROUTER_MODEL: &str = "meta-llama/llama-4-maverick:free";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash-exp";
const DEFAULT_MAX_PASSES: u32 = 1;
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Settings for one generation run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub openrouter_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub openrouter_model: String,
    pub gemini_model: String,
    /// Refinement passes over the generated document. At least 1.
    pub max_refine_passes: u32,
    pub request_timeout_secs: u64,
}

impl GeneratorConfig {
    /// Snapshot settings from the environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            openrouter_api_key: env_string(OPENROUTER_KEY_VAR),
            gemini_api_key: env_string(GEMINI_KEY_VAR),
            openrouter_model: env_string(OPENROUTER_MODEL_VAR)
                .unwrap_or_else(|| DEFAULT_OPENROUTER_MODEL.to_string()),
            gemini_model: env_string(GEMINI_MODEL_VAR)
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            max_refine_passes: env_parsed(MAX_PASSES_VAR)?.unwrap_or(DEFAULT_MAX_PASSES),
            request_timeout_secs: env_parsed(TIMEOUT_VAR)?.unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Backend used when the caller names none: Gemini when its key is set,
    /// otherwise OpenRouter.
    pub fn default_provider(&self) -> Provider {
        if self.gemini_api_key.is_some() {
            Provider::Gemini
        } else {
            Provider::OpenRouter
        }
    }

    pub fn model_for(&self, provider: Provider) -> &str {
        match provider {
            Provider::OpenRouter => &self.openrouter_model,
            Provider::Gemini => &self.gemini_model,
        }
    }

    pub fn api_key_for(&self, provider: Provider) -> Option<&str> {
        match provider {
            Provider::OpenRouter => self.openrouter_api_key.as_deref(),
            Provider::Gemini => self.gemini_api_key.as_deref(),
        }
    }

    /// Reject bounds the workflow cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.max_refine_passes == 0 {
            return Err(anyhow!("max refine passes must be at least 1"));
        }
        Ok(())
    }
}

fn env_string(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn env_parsed<T: std::str::FromStr>(var: &str) -> Result<Option<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env_string(var) {
        Some(value) => {
            let parsed = value.parse().with_context(|| format!("parse {var}"))?;
            Ok(Some(parsed))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_config() -> GeneratorConfig {
        GeneratorConfig {
            openrouter_api_key: None,
            gemini_api_key: None,
            openrouter_model: DEFAULT_OPENROUTER_MODEL.to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            max_refine_passes: DEFAULT_MAX_PASSES,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    #[test]
    fn gemini_key_wins_provider_default() {
        let mut config = bare_config();
        assert_eq!(config.default_provider(), Provider::OpenRouter);

        config.gemini_api_key = Some("key".to_string());
        assert_eq!(config.default_provider(), Provider::Gemini);

        config.openrouter_api_key = Some("key".to_string());
        assert_eq!(config.default_provider(), Provider::Gemini);
    }

    #[test]
    fn models_resolve_per_provider() {
        let config = bare_config();
        assert_eq!(config.model_for(Provider::OpenRouter), DEFAULT_OPENROUTER_MODEL);
        assert_eq!(config.model_for(Provider::Gemini), DEFAULT_GEMINI_MODEL);
    }

    #[test]
    fn zero_passes_is_rejected() {
        let mut config = bare_config();
        config.max_refine_passes = 0;
        assert!(config.validate().is_err());
        config.max_refine_passes = 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_keys_read_as_none() {
        let config = bare_config();
        assert!(config.api_key_for(Provider::OpenRouter).is_none());
        assert!(config.api_key_for(Provider::Gemini).is_none());
    }
}
