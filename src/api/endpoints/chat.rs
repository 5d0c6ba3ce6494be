//! Chat assistant endpoints.
//!
//! All three return 503 `ASSISTANT_UNAVAILABLE` when no API credential was
//! configured at startup. A failed upstream request is not an HTTP error:
//! the error text comes back as a `system` message in the transcript,
//! shown inline in the conversation.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::assistant::{ChatMode, ChatSession};
use crate::models::ChatMessage;

fn session(ctx: &ApiContext) -> Result<&Mutex<ChatSession>, ApiError> {
    ctx.state
        .assistant
        .as_ref()
        .ok_or(ApiError::AssistantUnavailable)
}

#[derive(Deserialize)]
pub struct SendRequest {
    pub text: String,
    #[serde(default)]
    pub mode: ChatMode,
}

#[derive(Serialize)]
pub struct SendResponse {
    pub message: ChatMessage,
}

/// `POST /api/chat/send`
pub async fn send(
    State(ctx): State<ApiContext>,
    Json(req): Json<SendRequest>,
) -> Result<Json<SendResponse>, ApiError> {
    let text = req.text.trim();
    if text.is_empty() {
        return Err(ApiError::BadRequest("Message text is required".into()));
    }
    // One outstanding request at a time; later submissions wait here.
    let mut session = session(&ctx)?.lock().await;
    let message = session.send(text, req.mode).await;
    Ok(Json(SendResponse { message }))
}

#[derive(Serialize)]
pub struct MessagesResponse {
    pub messages: Vec<ChatMessage>,
}

/// `GET /api/chat/messages` — the session transcript.
pub async fn messages(State(ctx): State<ApiContext>) -> Result<Json<MessagesResponse>, ApiError> {
    let session = session(&ctx)?.lock().await;
    Ok(Json(MessagesResponse {
        messages: session.messages().to_vec(),
    }))
}

/// `POST /api/chat/reset` — drop the transcript, fresh greeting.
pub async fn reset(State(ctx): State<ApiContext>) -> Result<Json<MessagesResponse>, ApiError> {
    let mut session = session(&ctx)?.lock().await;
    session.reset();
    Ok(Json(MessagesResponse {
        messages: session.messages().to_vec(),
    }))
}
