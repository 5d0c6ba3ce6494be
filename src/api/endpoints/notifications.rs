//! Notification permission endpoints.
//!
//! Flipping permission to granted re-arms every stored reminder and
//! appointment — scheduling is a no-op while permission is anything else,
//! so this is the moment the timer map gets rebuilt.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::notify::Permission;

#[derive(Serialize, Deserialize)]
pub struct PermissionBody {
    pub permission: Permission,
}

/// `GET /api/notifications/permission`
pub async fn current(State(ctx): State<ApiContext>) -> Json<PermissionBody> {
    Json(PermissionBody {
        permission: ctx.state.permission(),
    })
}

/// `POST /api/notifications/permission` — set permission explicitly.
pub async fn update(
    State(ctx): State<ApiContext>,
    Json(body): Json<PermissionBody>,
) -> Result<Json<PermissionBody>, ApiError> {
    apply(&ctx, body.permission)?;
    Ok(Json(PermissionBody {
        permission: ctx.state.permission(),
    }))
}

/// `POST /api/notifications/request` — browser-style permission request:
/// undecided becomes granted, a prior denial stays denied.
pub async fn request(State(ctx): State<ApiContext>) -> Result<Json<PermissionBody>, ApiError> {
    let requested = ctx.state.permission().after_request();
    apply(&ctx, requested)?;
    Ok(Json(PermissionBody {
        permission: ctx.state.permission(),
    }))
}

fn apply(ctx: &ApiContext, permission: Permission) -> Result<(), ApiError> {
    let before = ctx.state.permission();
    ctx.state.set_permission(permission)?;
    if permission == Permission::Granted && before != Permission::Granted {
        ctx.state.scheduler.rearm_all(&ctx.state.store);
    }
    Ok(())
}
