//! Per-request handler: parse, forward, envelope

use axum::{body::Body, http::StatusCode, response::Response};
use std::sync::Arc;

use super::error::RelayError;
use crate::api::{ChatEnvelope, ChatMessage, ChatRequest};
use crate::backend::TextGenerator;

/// Headers set verbatim on every envelope; the browser client and its
/// gateway-era callers expect exactly this set.
pub const ENVELOPE_HEADERS: [(&str, &str); 4] = [
    ("Content-Type", "application/json"),
    ("Access-Control-Allow-Origin", "*"),
    (
        "Access-Control-Allow-Headers",
        "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token",
    ),
    ("Access-Control-Allow-Methods", "OPTIONS,POST"),
];

/// The single per-request handler
///
/// Stateless across invocations; the only held resource is the backend
/// seam, injected at startup.
pub struct ChatRelayHandler {
    backend: Arc<dyn TextGenerator>,
}

impl ChatRelayHandler {
    pub fn new(backend: Arc<dyn TextGenerator>) -> Self {
        Self { backend }
    }

    /// Handle one raw request body, returning the full HTTP response
    ///
    /// Every failure, from parse errors to upstream trouble, collapses
    /// into the 500 failure envelope.
    pub async fn handle(&self, body: &[u8]) -> Response {
        match self.relay(body).await {
            Ok(envelope) => envelope_response(StatusCode::OK, &envelope),
            Err(err) => {
                tracing::error!(error = %err, "chat relay failed");
                envelope_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &ChatEnvelope::failure(err.to_string()),
                )
            }
        }
    }

    async fn relay(&self, body: &[u8]) -> Result<ChatEnvelope, RelayError> {
        let request: ChatRequest = serde_json::from_slice(body)
            .map_err(|e| RelayError::MalformedRequest(e.to_string()))?;

        tracing::info!(message = %preview(&request.message), "processing chat message");

        // The caller's history is left untouched; the reply carries a new
        // sequence with the two new turns appended.
        let mut history = request.conversation_history.clone();
        history.push(ChatMessage::user(request.message.clone()));

        let generated = self
            .backend
            .generate(&request.message, &request.conversation_history)
            .await?;
        history.push(ChatMessage::assistant(generated.clone()));

        Ok(ChatEnvelope::success(generated, history))
    }
}

/// Build an envelope response carrying the fixed header set
pub fn envelope_response(status: StatusCode, envelope: &ChatEnvelope) -> Response {
    let body = serde_json::to_vec(envelope).unwrap_or_else(|_| {
        br#"{"success":false,"error":"failed to encode response"}"#.to_vec()
    });

    let mut builder = Response::builder().status(status);
    for (name, value) in ENVELOPE_HEADERS {
        builder = builder.header(name, value);
    }
    builder.body(Body::from(body)).unwrap()
}

/// CORS preflight response with the same fixed header set
pub fn preflight_response() -> Response {
    let mut builder = Response::builder().status(StatusCode::NO_CONTENT);
    for (name, value) in ENVELOPE_HEADERS {
        builder = builder.header(name, value);
    }
    builder.body(Body::empty()).unwrap()
}

/// Single-line preview of the incoming message for the request log
fn preview(message: &str) -> String {
    const MAX_CHARS: usize = 100;

    let flat = message.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= MAX_CHARS {
        flat
    } else {
        let mut truncated: String = flat.chars().take(MAX_CHARS).collect();
        truncated.push_str(" ...");
        truncated
    }
}
