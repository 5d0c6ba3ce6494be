//! Appointment endpoints.
//!
//! Saving arms the pre-appointment reminder with the 1h → 10min → ~1s
//! fallback offsets; a past appointment saves fine but arms nothing
//! (logged, not an error).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::Appointment;

#[derive(Serialize)]
pub struct AppointmentsResponse {
    pub appointments: Vec<Appointment>,
}

/// `GET /api/appointments`
pub async fn list(State(ctx): State<ApiContext>) -> Json<AppointmentsResponse> {
    Json(AppointmentsResponse {
        appointments: ctx.state.store.appointments(),
    })
}

#[derive(Deserialize)]
pub struct SaveAppointmentRequest {
    pub id: Option<Uuid>,
    pub title: String,
    #[serde(default)]
    pub doctor: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    pub notes: Option<String>,
}

/// `POST /api/appointments` — create or update an appointment.
pub async fn save(
    State(ctx): State<ApiContext>,
    Json(req): Json<SaveAppointmentRequest>,
) -> Result<Json<Appointment>, ApiError> {
    let title = req.title.trim();
    if title.is_empty() {
        return Err(ApiError::BadRequest(
            "Appointment title, date, and time are required".into(),
        ));
    }
    let date = NaiveDate::parse_from_str(req.date.trim(), "%Y-%m-%d").map_err(|_| {
        ApiError::BadRequest(format!("Invalid date '{}': expected YYYY-MM-DD", req.date))
    })?;
    let time = NaiveTime::parse_from_str(req.time.trim(), "%H:%M").map_err(|_| {
        ApiError::BadRequest(format!("Invalid time '{}': expected HH:MM", req.time))
    })?;

    let updating = req
        .id
        .is_some_and(|id| ctx.state.store.appointments().iter().any(|a| a.id == id));

    let appointment = Appointment {
        id: req.id.unwrap_or_else(Uuid::new_v4),
        title: title.to_string(),
        doctor: req.doctor.trim().to_string(),
        date,
        time,
        notes: req.notes.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
    };

    ctx.state.store.save_appointment(&appointment)?;
    ctx.state.scheduler.arm_appointment(&appointment);
    ctx.state.scheduler.display_now(
        "Appointment Set!",
        &format!(
            "Appointment for {} on {} at {} has been {}.",
            appointment.title,
            appointment.date.format("%Y-%m-%d"),
            appointment.time.format("%H:%M"),
            if updating { "updated" } else { "added" }
        ),
    );

    Ok(Json(appointment))
}

/// `DELETE /api/appointments/:id`
pub async fn remove(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ctx.state.scheduler.cancel(id);
    if !ctx.state.store.delete_appointment(id)? {
        return Err(ApiError::NotFound("Appointment not found".into()));
    }
    ctx.state.scheduler.display_now(
        "Appointment Deleted",
        "The appointment has been successfully deleted.",
    );
    Ok(StatusCode::NO_CONTENT)
}
