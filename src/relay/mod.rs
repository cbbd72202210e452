//! HTTP relay server and per-request handler

mod error;
mod handler;
pub mod server;

pub use error::RelayError;
pub use handler::{ChatRelayHandler, ENVELOPE_HEADERS};
pub use server::{build_router, run_server, RelayState};
