//! OpenAI chat-completion backend.

use async_trait::async_trait;

use crate::error::GeneratorError;

use super::MessageGenerator;
use super::chat::{AuthScheme, ChatClient, Sampling};

pub const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const OPENAI_MODEL: &str = "gpt-3.5-turbo";

const SAMPLING: Sampling = Sampling {
    temperature: 0.7,
    max_tokens: 256,
    frequency_penalty: 0.0,
    presence_penalty: 0.0,
};

/// Public OpenAI API, authenticated with `Authorization: Bearer`.
pub struct OpenAiGenerator {
    client: ChatClient,
}

impl OpenAiGenerator {
    pub fn new(api_key: &str) -> Result<Self, GeneratorError> {
        Self::with_base_url(api_key, OPENAI_API_URL)
    }

    /// Create against a custom URL (OpenAI-compatible proxies, mock servers).
    pub fn with_base_url(api_key: &str, url: &str) -> Result<Self, GeneratorError> {
        let client = ChatClient::new(url, OPENAI_MODEL, api_key, AuthScheme::Bearer, SAMPLING)?;
        Ok(Self { client })
    }

    /// Request descriptions in `language`.
    pub fn with_language(self, language: &str) -> Self {
        Self {
            client: self.client.with_language(language),
        }
    }

    pub fn client(&self) -> &ChatClient {
        &self.client
    }
}

#[async_trait]
impl MessageGenerator for OpenAiGenerator {
    async fn generate(&self, diff: &str) -> Result<String, GeneratorError> {
        self.client.complete(diff).await
    }
}
