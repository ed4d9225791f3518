use crate::domain::ports::{ConfigProvider, TextGenerator};
use crate::utils::error::{CardError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Text generator backed by any service that speaks the OpenAI
/// chat-completions protocol (OpenAI, Mistral, Groq, Ollama, ...).
pub struct OpenAiCompatibleGenerator {
    client: Client,
    completions_url: String,
    model: String,
    api_key: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl OpenAiCompatibleGenerator {
    pub fn new(endpoint: &str, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            completions_url: format!("{}/chat/completions", endpoint.trim_end_matches('/')),
            model: model.into(),
            api_key: None,
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        let mut generator = Self::new(config.endpoint(), config.model());
        generator.api_key = config.api_key().map(str::to_string);
        generator.temperature = config.temperature();
        generator.max_tokens = config.max_tokens();
        generator
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn completions_url(&self) -> &str {
        &self.completions_url
    }
}

#[async_trait]
impl TextGenerator for OpenAiCompatibleGenerator {
    async fn respond_to_prompt(&self, prompt: &str) -> Result<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        tracing::debug!("Making API request to: {}", self.completions_url);
        let mut request = self.client.post(&self.completions_url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CardError::ExternalServiceError {
                status: Some(status.as_u16()),
                message,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or_else(|| CardError::ExternalServiceError {
                status: Some(status.as_u16()),
                message: "response contained no choices".to_string(),
            })
    }
}
