//! Error taxonomy for a single relay invocation
//!
//! Every kind collapses into the same 500 failure envelope at the top of
//! the handler; the variants exist so logs and tests can tell the kinds
//! apart.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    /// Request body was not valid JSON or lacked required fields
    #[error("invalid request body: {0}")]
    MalformedRequest(String),

    /// The backend could not be reached or the transport failed mid-call
    #[error("failed to reach generation backend: {0}")]
    UpstreamTransport(reqwest::Error),

    /// The backend answered with something other than the expected shape
    #[error("unexpected response from generation backend: {0}")]
    UpstreamProtocol(String),

    /// The backend answered but produced no generated text
    #[error("No response content from the model")]
    EmptyGeneration,
}
