//! Commit message generation via remote chat-completion backends.

pub mod chat;
pub mod enterprise;
pub mod openai;
pub mod prompt;

pub use chat::{AuthScheme, ChatClient, Sampling, parse_response};
pub use enterprise::EnterpriseGenerator;
pub use openai::OpenAiGenerator;
pub use prompt::{ChatMessage, DEFAULT_LANGUAGE, build_messages, system_prompt};

use std::fmt;

use async_trait::async_trait;
use tracing::debug;

use crate::error::GeneratorError;

/// Turns a staged diff into commit message text.
///
/// This abstraction allows swapping backends and mocking the HTTP call in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageGenerator: Send + Sync {
    /// Generate a commit message for `diff`.
    ///
    /// The returned text is not validated or trimmed.
    async fn generate(&self, diff: &str) -> Result<String, GeneratorError>;
}

#[async_trait]
impl<G: MessageGenerator + ?Sized> MessageGenerator for Box<G> {
    async fn generate(&self, diff: &str) -> Result<String, GeneratorError> {
        (**self).generate(diff).await
    }
}

/// Available generator backends, selected by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorKind {
    OpenAi,
    Enterprise,
}

impl GeneratorKind {
    pub const DEFAULT: GeneratorKind = GeneratorKind::OpenAi;

    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratorKind::OpenAi => "openai",
            GeneratorKind::Enterprise => "enterprise",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GeneratorKind {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(GeneratorKind::OpenAi),
            "enterprise" => Ok(GeneratorKind::Enterprise),
            _ => Err(GeneratorError::UnknownGenerator(s.to_string())),
        }
    }
}

/// Resolved credentials and endpoints handed to a backend constructor.
///
/// Each backend reads only its own endpoint field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSettings {
    pub api_key: String,
    /// Replacement for the public OpenAI URL.
    pub openai_url: Option<String>,
    /// Deployment URL, required by `enterprise`.
    pub enterprise_endpoint: Option<String>,
    /// Language the description is requested in.
    pub language: String,
}

impl GeneratorSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            openai_url: None,
            enterprise_endpoint: None,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// Construct the backend for `kind`.
pub fn create_generator(
    kind: GeneratorKind,
    settings: &GeneratorSettings,
) -> Result<Box<dyn MessageGenerator>, GeneratorError> {
    debug!("Using {} generator", kind);

    match kind {
        GeneratorKind::OpenAi => {
            let generator = match settings.openai_url.as_deref() {
                Some(url) => OpenAiGenerator::with_base_url(&settings.api_key, url)?,
                None => OpenAiGenerator::new(&settings.api_key)?,
            };
            Ok(Box::new(generator.with_language(&settings.language)))
        }
        GeneratorKind::Enterprise => {
            let endpoint = settings
                .enterprise_endpoint
                .as_deref()
                .ok_or_else(|| GeneratorError::MissingEndpoint(kind.to_string()))?;
            let generator = EnterpriseGenerator::new(&settings.api_key, endpoint)?;
            Ok(Box::new(generator.with_language(&settings.language)))
        }
    }
}
