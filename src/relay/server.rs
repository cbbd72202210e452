//! Relay server wiring: router, shared state, startup

use axum::{
    body::to_bytes,
    extract::State,
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::Instrument;
use uuid::Uuid;

use super::handler::{envelope_response, preflight_response, ChatRelayHandler};
use crate::api::ChatEnvelope;
use crate::backend::HttpGenerator;
use crate::config::AppConfig;

/// Inbound body cap; a chat message has no business being larger
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Shared state for the relay
#[derive(Clone)]
pub struct RelayState {
    pub config: Arc<AppConfig>,
    pub handler: Arc<ChatRelayHandler>,
}

/// Build the HTTP client used for backend calls
pub fn build_http_client(config: &AppConfig) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.backend.timeout_seconds))
        .pool_max_idle_per_host(10);

    if config.backend.accept_invalid_certs {
        builder = builder.danger_accept_invalid_certs(true);
        tracing::warn!("TLS: accepting invalid certificates (use only for development/testing)");
    }

    builder.build()
}

/// Build the relay router
pub fn build_router(state: RelayState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/chat", post(chat_handler).options(preflight_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the relay server
pub async fn run_server(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let client = build_http_client(&config)?;
    let backend = Arc::new(HttpGenerator::new(client, config.backend.clone()));
    let handler = Arc::new(ChatRelayHandler::new(backend));

    let state = RelayState {
        config: Arc::new(config.clone()),
        handler,
    };

    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("chat-relay listening on {}", addr);
    tracing::info!("Relaying to {}", config.backend.endpoint());

    Ok(axum::serve(listener, app).await?)
}

/// Health check endpoint
async fn health_handler() -> &'static str {
    "OK"
}

/// `POST /chat`: read the raw body and hand it to the relay handler
async fn chat_handler(State(state): State<RelayState>, req: axum::extract::Request) -> Response {
    let request_id = Uuid::new_v4();
    async move {
        let body = match to_bytes(req.into_body(), MAX_BODY_BYTES).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(error = %e, "failed to read request body");
                return envelope_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &ChatEnvelope::failure(format!("failed to read request body: {}", e)),
                );
            }
        };
        state.handler.handle(&body).await
    }
    .instrument(tracing::info_span!("chat", %request_id))
    .await
}

/// `OPTIONS /chat`: CORS preflight
async fn preflight_handler() -> Response {
    preflight_response()
}
