//! Enterprise-hosted deployment backend.
//!
//! The deployment URL selects the model on the server side; the key travels
//! in the `OpenAI-Organization` header instead of `Authorization`.

use async_trait::async_trait;

use crate::error::GeneratorError;

use super::MessageGenerator;
use super::chat::{AuthScheme, ChatClient, Sampling};

pub const ENTERPRISE_MODEL: &str = "gpt-4-32k";

const SAMPLING: Sampling = Sampling {
    temperature: 0.9,
    max_tokens: 2000,
    frequency_penalty: 0.0,
    presence_penalty: 0.6,
};

pub struct EnterpriseGenerator {
    client: ChatClient,
}

impl EnterpriseGenerator {
    pub fn new(api_key: &str, endpoint: &str) -> Result<Self, GeneratorError> {
        let client = ChatClient::new(
            endpoint,
            ENTERPRISE_MODEL,
            api_key,
            AuthScheme::Organization,
            SAMPLING,
        )?;
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
impl MessageGenerator for EnterpriseGenerator {
    async fn generate(&self, diff: &str) -> Result<String, GeneratorError> {
        self.client.complete(diff).await
    }
}
