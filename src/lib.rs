//! chat-relay: HTTP relay for a text-generation backend
//!
//! Accepts a chat message over `POST /chat`, forwards it to a remote
//! text-generation endpoint, and returns the generated text in a fixed
//! JSON envelope alongside the updated conversation history.

pub mod api;
pub mod backend;
pub mod config;
pub mod relay;

pub use backend::{HttpGenerator, TextGenerator};
pub use config::AppConfig;
pub use relay::{run_server, ChatRelayHandler, RelayError};
