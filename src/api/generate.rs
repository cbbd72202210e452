//! Outbound payloads for the text-generation backend
//!
//! Two wire shapes exist, selected by `backend.flavor`:
//! - prompt-style: `{prompt, max_new_tokens, do_sample, temperature, top_p}`
//!   answered by `{generated_text}`
//! - messages-style: the whole conversation plus an inference config,
//!   answered by `{output: {message: {content: [{text}]}}}`

use serde::{Deserialize, Serialize};

use super::chat::{ChatMessage, Role};

/// Fixed sampling parameters for the prompt-style payload
pub const MAX_NEW_TOKENS: u32 = 100;
pub const DO_SAMPLE: bool = true;
pub const TEMPERATURE: f32 = 0.7;
pub const TOP_P: f32 = 0.9;

/// Token cap for the messages-style payload
pub const MESSAGES_MAX_TOKENS: u32 = 512;

/// Prompt-style request body
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub max_new_tokens: u32,
    pub do_sample: bool,
    pub temperature: f32,
    pub top_p: f32,
}

impl GenerationRequest {
    /// Build a request for one prompt with the fixed sampling parameters
    pub fn for_prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_new_tokens: MAX_NEW_TOKENS,
            do_sample: DO_SAMPLE,
            temperature: TEMPERATURE,
            top_p: TOP_P,
        }
    }
}

/// Prompt-style response body
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationResponse {
    #[serde(default)]
    pub generated_text: Option<String>,
}

impl GenerationResponse {
    /// The generated text, unless missing or empty
    pub fn text(&self) -> Option<&str> {
        match self.generated_text.as_deref() {
            Some(text) if !text.is_empty() => Some(text),
            _ => None,
        }
    }
}

/// Messages-style request body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagesRequest {
    pub messages: Vec<MessageTurn>,
    pub inference_config: InferenceConfig,
}

impl MessagesRequest {
    /// Wrap the full conversation in the messages wire shape
    pub fn new(turns: &[ChatMessage]) -> Self {
        Self {
            messages: turns
                .iter()
                .map(|turn| MessageTurn {
                    role: turn.role,
                    content: vec![TextBlock {
                        text: turn.content.clone(),
                    }],
                })
                .collect(),
            inference_config: InferenceConfig::default(),
        }
    }
}

/// One conversation turn in the messages wire shape
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MessageTurn {
    pub role: Role,
    pub content: Vec<TextBlock>,
}

/// Text content block
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TextBlock {
    pub text: String,
}

/// Inference settings sent with every messages-style request
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceConfig {
    pub max_tokens: u32,
    pub stop_sequences: Vec<String>,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            max_tokens: MESSAGES_MAX_TOKENS,
            stop_sequences: Vec::new(),
            temperature: TEMPERATURE,
            top_p: TOP_P,
        }
    }
}

/// Messages-style response body
#[derive(Debug, Clone, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub output: Option<MessagesOutput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessagesOutput {
    #[serde(default)]
    pub message: Option<OutputMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputMessage {
    #[serde(default)]
    pub content: Vec<TextBlock>,
}

impl MessagesResponse {
    /// Text of the first content block, unless missing or empty
    pub fn text(&self) -> Option<&str> {
        let block = self.output.as_ref()?.message.as_ref()?.content.first()?;
        if block.text.is_empty() {
            None
        } else {
            Some(&block.text)
        }
    }
}
