//! Manual vital tracking endpoints. Append-only, newest first.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Local;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{VitalRecord, VitalType};

#[derive(Serialize)]
pub struct VitalsResponse {
    pub vitals: Vec<VitalRecord>,
}

/// `GET /api/vitals`
pub async fn list(State(ctx): State<ApiContext>) -> Json<VitalsResponse> {
    Json(VitalsResponse {
        vitals: ctx.state.store.vitals(),
    })
}

#[derive(Deserialize)]
pub struct AddVitalRequest {
    pub vital_type: VitalType,
    pub value: f64,
    /// Defaults to the type's unit (steps / bpm / mg/dL).
    pub unit: Option<String>,
}

/// `POST /api/vitals` — record a measurement. The server assigns id and
/// timestamp.
pub async fn add(
    State(ctx): State<ApiContext>,
    Json(req): Json<AddVitalRequest>,
) -> Result<Json<VitalRecord>, ApiError> {
    if !req.value.is_finite() || req.value < 0.0 {
        return Err(ApiError::BadRequest(
            "Value is required and must be a non-negative number".into(),
        ));
    }

    let record = VitalRecord {
        id: Uuid::new_v4(),
        vital_type: req.vital_type,
        value: req.value,
        unit: req
            .unit
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| req.vital_type.default_unit().to_string()),
        recorded_at: Local::now().naive_local(),
    };
    ctx.state.store.add_vital(&record)?;
    Ok(Json(record))
}

/// `DELETE /api/vitals/:id`
pub async fn remove(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !ctx.state.store.delete_vital(id)? {
        return Err(ApiError::NotFound("Vital record not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}
