use super::{AppState, TurnBody};
use crate::error::{EngineError, LlmError};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};

/// GET /health — liveness probe, no secrets leaked
pub(super) async fn handle_health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

/// POST /turn — run one turn of the game
pub(super) async fn handle_turn(
    State(state): State<AppState>,
    body: Result<Json<TurnBody>, axum::extract::rejection::JsonRejection>,
) -> impl IntoResponse {
    // ── Parse body ──
    let Json(turn_body) = match body {
        Ok(b) => b,
        Err(e) => {
            let err = serde_json::json!({
                "error": format!("Invalid JSON: {e}. Expected: {{\"gameState\": {{...}}}}"),
                "kind": "bad_request",
            });
            return (StatusCode::BAD_REQUEST, Json(err));
        }
    };

    let Some(game_state) = turn_body.game_state else {
        return error_response(&EngineError::MissingInput);
    };

    match state.engine.take_turn(game_state).await {
        Ok(outcome) => {
            let body = serde_json::json!({
                "decision": outcome.decision,
                "updatedGameState": outcome.state,
            });
            (StatusCode::OK, Json(body))
        }
        Err(e) => {
            tracing::error!(kind = e.kind(), "turn failed: {e}");
            error_response(&e)
        }
    }
}

/// Classified failure, without internal stack detail: 400 for a client
/// mistake, 503 when the server cannot authenticate upstream, 502 for
/// everything the upstream did wrong (network or format alike — the `kind`
/// field carries the finer taxonomy).
fn error_response(err: &EngineError) -> (StatusCode, Json<serde_json::Value>) {
    let status = match err {
        EngineError::MissingInput => StatusCode::BAD_REQUEST,
        EngineError::Config(_) | EngineError::Llm(LlmError::MissingApiKey) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        EngineError::Llm(_) | EngineError::Format(_) => StatusCode::BAD_GATEWAY,
    };

    let body = serde_json::json!({
        "error": err.to_string(),
        "kind": err.kind(),
    });
    (status, Json(body))
}
