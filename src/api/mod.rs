//! Wire types: inbound chat contract and outbound generation payloads

mod chat;
mod generate;

pub use chat::*;
pub use generate::*;
