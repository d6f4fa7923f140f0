// src/server/routes.rs

//! The JSON surface over the presence service.
//!
//! Every route resolves a client identifier first: the `x-client-id`
//! header wins over the `client` query parameter, and when neither is
//! present a fresh UUID is minted and echoed back so the browser can
//! reuse it on its next poll.

use crate::core::presence::{Status, Summary};
use crate::core::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Header carrying the client identifier issued by the session layer.
pub const CLIENT_ID_HEADER: &str = "x-client-id";

const NO_SELECTION_MESSAGE: &str = "No cup selected yet";

#[derive(Debug, Default, Deserialize)]
pub struct ClientQuery {
    pub client: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HeartbeatResponse {
    pub client_id: String,
    pub selection: Option<Status>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SelectionResponse {
    pub client_id: String,
    pub status: Option<Status>,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub client_id: String,
    pub error: String,
}

/// Builds the board's router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/heartbeat", get(heartbeat))
        .route("/select/{status}", get(select).post(select))
        .route("/selection", get(selection))
        .route("/summary", get(summary))
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
}

/// Header first, then query. Both are trimmed so they name the same client;
/// a blank value counts as absent.
pub fn resolve_client_id(headers: &HeaderMap, query: ClientQuery) -> String {
    fn non_blank(id: &str) -> Option<String> {
        let id = id.trim();
        (!id.is_empty()).then(|| id.to_string())
    }

    headers
        .get(CLIENT_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(non_blank)
        .or_else(|| query.client.as_deref().and_then(non_blank))
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// The cup panel poll: refreshes liveness and returns the current selection.
async fn heartbeat(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ClientQuery>,
) -> Json<HeartbeatResponse> {
    let client_id = resolve_client_id(&headers, query);
    state.presence.record_heartbeat(&client_id);
    let selection = state.presence.get_selection(&client_id);
    Json(HeartbeatResponse {
        client_id,
        selection,
    })
}

async fn select(
    State(state): State<Arc<AppState>>,
    Path(input): Path<String>,
    headers: HeaderMap,
    Query(query): Query<ClientQuery>,
) -> Response {
    let client_id = resolve_client_id(&headers, query);
    match state.presence.record_selection(&client_id, &input) {
        Ok(status) => Json(SelectionResponse {
            client_id,
            status: Some(status),
            message: format!("You selected a {} cup.", status.label()),
        })
        .into_response(),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                client_id,
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

async fn selection(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ClientQuery>,
) -> Json<SelectionResponse> {
    let client_id = resolve_client_id(&headers, query);
    let status = state.presence.get_selection(&client_id);
    let message = match status {
        Some(status) => status.label().to_string(),
        None => NO_SELECTION_MESSAGE.to_string(),
    };
    Json(SelectionResponse {
        client_id,
        status,
        message,
    })
}

async fn summary(State(state): State<Arc<AppState>>) -> Json<Summary> {
    Json(state.presence.get_summary())
}
