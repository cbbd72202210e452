//! Inbound chat request and the response envelope

use serde::{Deserialize, Serialize};

/// Speaker of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn of a conversation, ordered chronologically by the caller
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Body of `POST /chat`
///
/// `message` is required; the history is optional and defaults to empty.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default, rename = "conversationHistory")]
    pub conversation_history: Vec<ChatMessage>,
}

/// Response envelope returned for every invocation
///
/// A success carries the generated text and the extended history; a
/// failure carries only the error text. The two never mix.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ChatEnvelope {
    Success {
        success: bool,
        response: String,
        #[serde(rename = "conversationHistory")]
        conversation_history: Vec<ChatMessage>,
    },
    Failure {
        success: bool,
        error: String,
    },
}

impl ChatEnvelope {
    pub fn success(response: impl Into<String>, conversation_history: Vec<ChatMessage>) -> Self {
        Self::Success {
            success: true,
            response: response.into(),
            conversation_history,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            success: false,
            error: error.into(),
        }
    }
}
