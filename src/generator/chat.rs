//! Shared chat-completion client used by every HTTP backend.
//!
//! Backends differ only in endpoint, auth header, model, and sampling
//! parameters; the request and response shapes are the same.

use std::env;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::GeneratorError;

use super::prompt::{ChatMessage, DEFAULT_LANGUAGE, build_messages};

/// Default timeout for a generation request.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Environment variable to override the default timeout.
const TIMEOUT_ENV_VAR: &str = "AI_COMMIT_TIMEOUT";

const ORGANIZATION_HEADER: &str = "openai-organization";

/// Get the configured request timeout.
///
/// Reads from AI_COMMIT_TIMEOUT if set, otherwise uses 60 seconds.
/// Logs a warning if the variable is set but not a whole number of seconds.
pub fn get_timeout() -> Duration {
    match env::var(TIMEOUT_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(_) => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    TIMEOUT_ENV_VAR, v, DEFAULT_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        },
        _ => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
}

/// How the API key is presented to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Authorization: Bearer <key>`
    Bearer,
    /// `OpenAI-Organization: Bearer <key>`
    Organization,
}

impl AuthScheme {
    fn header(&self, api_key: &str) -> Result<(HeaderName, HeaderValue), GeneratorError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|_| GeneratorError::InvalidCredential)?;
        value.set_sensitive(true);

        let name = match self {
            AuthScheme::Bearer => AUTHORIZATION,
            AuthScheme::Organization => HeaderName::from_static(ORGANIZATION_HEADER),
        };
        Ok((name, value))
    }
}

/// Sampling parameters sent with every request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    pub temperature: f32,
    pub max_tokens: u32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

/// Request body for a chat-completion call.
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    pub stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Endpoint, credentials, and model for one backend.
pub struct ChatClient {
    http: Client,
    url: String,
    model: String,
    sampling: Sampling,
    language: String,
}

impl ChatClient {
    pub fn new(
        url: impl Into<String>,
        model: impl Into<String>,
        api_key: &str,
        auth: AuthScheme,
        sampling: Sampling,
    ) -> Result<Self, GeneratorError> {
        let mut headers = HeaderMap::new();
        let (name, value) = auth.header(api_key)?;
        headers.insert(name, value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(get_timeout())
            .build()
            .map_err(GeneratorError::ClientBuild)?;

        Ok(Self {
            http,
            url: url.into(),
            model: model.into(),
            sampling,
            language: DEFAULT_LANGUAGE.to_string(),
        })
    }

    /// Request descriptions in `language` instead of the default.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the request body for `diff`.
    pub fn request_body(&self, diff: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: build_messages(diff, &self.language),
            temperature: self.sampling.temperature,
            max_tokens: self.sampling.max_tokens,
            frequency_penalty: self.sampling.frequency_penalty,
            presence_penalty: self.sampling.presence_penalty,
            stream: false,
        }
    }

    /// Send `diff` to the backend and return the first completion's text.
    ///
    /// The text is returned as the backend produced it; callers trim it.
    pub async fn complete(&self, diff: &str) -> Result<String, GeneratorError> {
        let body = self.request_body(diff);
        debug!(
            "POST {} model={} diff_len={}",
            self.url,
            self.model,
            diff.len()
        );

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(GeneratorError::Transport)?;

        let status = response.status();
        let text = response.text().await.map_err(GeneratorError::Transport)?;
        debug!("Generation service responded with HTTP {}", status.as_u16());

        if !status.is_success() {
            return Err(GeneratorError::HttpStatus {
                status: status.as_u16(),
                body: text,
            });
        }

        parse_response(&text)
    }
}

/// Parse a chat-completion response body and take the first choice.
pub fn parse_response(body: &str) -> Result<String, GeneratorError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|source| GeneratorError::Decode {
            source,
            body: body.to_string(),
        })?;

    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or(GeneratorError::EmptyResponse)
}
