//! Outbound calls to the text-generation backend

use async_trait::async_trait;
use reqwest::header;
use serde::Serialize;

use crate::api::{ChatMessage, GenerationRequest, GenerationResponse, MessagesRequest, MessagesResponse};
use crate::config::{BackendConfig, BackendFlavor};
use crate::relay::RelayError;

/// A backend that turns the latest user message into generated text
///
/// `history` holds the prior turns; whether they reach the backend
/// depends on the implementation.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, message: &str, history: &[ChatMessage])
        -> Result<String, RelayError>;
}

/// HTTP text-generation backend
///
/// Issues one POST per call to the configured endpoint. The client is
/// injected at construction so the whole process shares a single pool.
pub struct HttpGenerator {
    client: reqwest::Client,
    config: BackendConfig,
}

impl HttpGenerator {
    pub fn new(client: reqwest::Client, config: BackendConfig) -> Self {
        Self { client, config }
    }

    async fn post_json<T: Serialize + Sync>(&self, payload: &T) -> Result<reqwest::Response, RelayError> {
        let mut request = self
            .client
            .post(self.config.endpoint())
            .header(header::CONTENT_TYPE, "application/json")
            .json(payload);

        if let Some(ref api_key) = self.config.api_key {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", api_key));
        }

        let response = request.send().await.map_err(RelayError::UpstreamTransport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::UpstreamProtocol(format!(
                "backend returned status {}",
                status
            )));
        }

        Ok(response)
    }

    /// Prompt flavor: only the latest message goes upstream
    async fn generate_prompt(&self, message: &str) -> Result<String, RelayError> {
        let payload = GenerationRequest::for_prompt(message);
        let response = self.post_json(&payload).await?;

        let body: GenerationResponse = response
            .json()
            .await
            .map_err(|e| RelayError::UpstreamProtocol(e.to_string()))?;

        match body.text() {
            Some(text) => Ok(text.to_owned()),
            None => Err(RelayError::EmptyGeneration),
        }
    }

    /// Messages flavor: the full history plus the new user turn goes upstream
    async fn generate_messages(
        &self,
        message: &str,
        history: &[ChatMessage],
    ) -> Result<String, RelayError> {
        let mut turns = history.to_vec();
        turns.push(ChatMessage::user(message));

        let payload = MessagesRequest::new(&turns);
        let response = self.post_json(&payload).await?;

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| RelayError::UpstreamProtocol(e.to_string()))?;

        match body.text() {
            Some(text) => Ok(text.to_owned()),
            None => Err(RelayError::EmptyGeneration),
        }
    }
}

#[async_trait]
impl TextGenerator for HttpGenerator {
    async fn generate(
        &self,
        message: &str,
        history: &[ChatMessage],
    ) -> Result<String, RelayError> {
        match self.config.flavor {
            BackendFlavor::Generate => self.generate_prompt(message).await,
            BackendFlavor::Messages => self.generate_messages(message, history).await,
        }
    }
}
