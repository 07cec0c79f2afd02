//! Configuration: persisted API key, environment overrides, first-run prompt.
//!
//! Resolution order for the API key:
//! 1. AI_COMMIT_API_KEY environment variable
//! 2. OPENAI_API_KEY environment variable
//! 3. `api_key` in the config file
//! 4. Interactive prompt, only when the config file does not exist; the
//!    answer is saved for later runs

pub mod store;

pub use store::{CONFIG_PATH_ENV_VAR, ConfigStore};

use std::env;

use dialoguer::Password;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::generator::{GeneratorKind, GeneratorSettings};

/// Environment variables checked for an API key, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["AI_COMMIT_API_KEY", "OPENAI_API_KEY"];

/// Environment variable setting the enterprise deployment URL.
pub const ENDPOINT_ENV_VAR: &str = "AI_COMMIT_ENDPOINT";

/// Environment variable pointing the openai generator at a compatible server.
pub const OPENAI_URL_ENV_VAR: &str = "AI_COMMIT_OPENAI_URL";

/// Environment variable setting the language of generated descriptions.
pub const LANGUAGE_ENV_VAR: &str = "AI_COMMIT_LANGUAGE";

/// Persisted configuration file contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api_key: String,

    /// Default generator when `--generator` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,

    /// Deployment URL for the enterprise generator. Never used by openai.
    #[serde(default, alias = "endpoint", skip_serializing_if = "Option::is_none")]
    pub enterprise_endpoint: Option<String>,

    /// Replacement for the public OpenAI URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_url: Option<String>,

    /// Language the commit description is written in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Config {
    /// Credentials, endpoints, and prompt language for the generator constructor.
    pub fn generator_settings(&self) -> GeneratorSettings {
        let mut settings = GeneratorSettings::new(&self.api_key);
        settings.openai_url = self.openai_url.clone();
        settings.enterprise_endpoint = self.enterprise_endpoint.clone();
        if let Some(language) = &self.language {
            settings.language = language.clone();
        }
        settings
    }

    /// Generator to use: the CLI choice, then the file, then the default.
    pub fn generator_name<'a>(&'a self, cli_choice: Option<&'a str>) -> &'a str {
        cli_choice
            .or(self.generator.as_deref())
            .unwrap_or(GeneratorKind::DEFAULT.as_str())
    }
}

/// First non-empty API key from the environment.
pub fn api_key_from_env() -> Option<String> {
    API_KEY_ENV_VARS.iter().find_map(|name| non_empty_var(name))
}

/// Ask for the API key on the terminal without echoing it.
pub fn prompt_api_key() -> Result<String, ConfigError> {
    Password::new()
        .with_prompt("Enter your API key")
        .interact()
        .map_err(|e| ConfigError::Prompt(e.to_string()))
}

/// Load the configuration from `store` and the environment.
///
/// `prompt` is called only when no key is set in the environment and the
/// config file does not exist; its answer is saved to `store`.
pub fn resolve<P>(store: &ConfigStore, prompt: P) -> Result<Config, ConfigError>
where
    P: FnOnce() -> Result<String, ConfigError>,
{
    let mut config = match (api_key_from_env(), store.load()?) {
        (Some(api_key), file) => {
            debug!("Using API key from environment");
            Config {
                api_key,
                ..file.unwrap_or_default()
            }
        }
        (None, Some(file)) => {
            if file.api_key.trim().is_empty() {
                return Err(ConfigError::EmptyApiKey);
            }
            file
        }
        (None, None) => {
            let api_key = prompt()?.trim().to_string();
            if api_key.is_empty() {
                return Err(ConfigError::EmptyApiKey);
            }
            let config = Config {
                api_key,
                ..Default::default()
            };
            store.save(&config)?;
            info!("Saved API key to {}", store.path().display());
            config
        }
    };

    if let Some(endpoint) = non_empty_var(ENDPOINT_ENV_VAR) {
        config.enterprise_endpoint = Some(endpoint);
    }
    if let Some(url) = non_empty_var(OPENAI_URL_ENV_VAR) {
        config.openai_url = Some(url);
    }
    if let Some(language) = non_empty_var(LANGUAGE_ENV_VAR) {
        config.language = Some(language);
    }

    Ok(config)
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
