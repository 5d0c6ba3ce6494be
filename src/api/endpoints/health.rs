//! Liveness and feature-availability endpoint.
//!
//! `assistant_available` is the UI's startup banner signal: when false,
//! chat features are disabled for the whole process lifetime.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;
use crate::config;
use crate::notify::Permission;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub assistant_available: bool,
    pub notification_permission: Permission,
}

/// `GET /api/health`
pub async fn check(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: config::APP_VERSION,
        assistant_available: ctx.state.assistant_available(),
        notification_permission: ctx.state.permission(),
    })
}
