//! Axum-based HTTP gateway.
//!
//! One inbound operation: submit the current game state, receive the enforced
//! decision plus the updated state, or a classified failure. Body limits and
//! request timeouts are enforced at the router so a stuck upstream call can
//! never pin a connection open indefinitely.

mod handlers;

use handlers::{handle_health, handle_turn};

use crate::config::Config;
use crate::game::{GameState, TurnEngine};
use crate::llm::GeminiProvider;
use anyhow::Result;
use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

/// Maximum request body size (64KB) — a game transcript is tiny
pub const MAX_BODY_SIZE: usize = 65_536;
/// Request timeout (30s)
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Shared state for all axum handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<TurnEngine>,
}

/// Turn request body
#[derive(serde::Deserialize)]
pub struct TurnBody {
    #[serde(rename = "gameState")]
    pub game_state: Option<GameState>,
}

/// Build the engine from configuration and serve it.
pub async fn run_gateway(config: &Config) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.gateway.host, config.gateway.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    let provider = Arc::new(GeminiProvider::new(config));
    let engine = Arc::new(TurnEngine::new(provider, config.policy));
    run_gateway_with_listener(listener, engine).await
}

/// Serve a pre-built engine from a pre-bound listener. Integration tests use
/// this to inject a mock-backed provider on an ephemeral port.
pub async fn run_gateway_with_listener(
    listener: tokio::net::TcpListener,
    engine: Arc<TurnEngine>,
) -> Result<()> {
    let state = AppState { engine };

    let app = Router::new()
        .route("/health", get(handle_health))
        .route("/turn", post(handle_turn))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TimeoutLayer::new(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
        .with_state(state);

    tracing::info!(addr = %listener.local_addr()?, "gateway listening");
    axum::serve(listener, app).await?;
    Ok(())
}
