//! Medication reminder endpoints.
//!
//! Saving a reminder re-arms its daily notification (cancelling any prior
//! timer for the same id) and fires an immediate confirmation; deleting
//! cancels the timer before the record goes away so a stale notification
//! can never fire.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::MedicationReminder;

#[derive(Serialize)]
pub struct RemindersResponse {
    pub reminders: Vec<MedicationReminder>,
}

/// `GET /api/medications`
pub async fn list(State(ctx): State<ApiContext>) -> Json<RemindersResponse> {
    Json(RemindersResponse {
        reminders: ctx.state.store.medication_reminders(),
    })
}

#[derive(Deserialize)]
pub struct SaveReminderRequest {
    /// Present when editing an existing reminder.
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub dosage: String,
    /// `HH:MM`, daily recurrence.
    pub time: String,
    pub notes: Option<String>,
}

/// `POST /api/medications` — create or update a reminder.
pub async fn save(
    State(ctx): State<ApiContext>,
    Json(req): Json<SaveReminderRequest>,
) -> Result<Json<MedicationReminder>, ApiError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest(
            "Medication name and time are required".into(),
        ));
    }
    let time = NaiveTime::parse_from_str(req.time.trim(), "%H:%M").map_err(|_| {
        ApiError::BadRequest(format!("Invalid time '{}': expected HH:MM", req.time))
    })?;

    let updating = req
        .id
        .is_some_and(|id| ctx.state.store.medication_reminders().iter().any(|r| r.id == id));

    let reminder = MedicationReminder {
        id: req.id.unwrap_or_else(Uuid::new_v4),
        name: name.to_string(),
        dosage: req.dosage.trim().to_string(),
        time,
        notes: req.notes.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
    };

    ctx.state.store.save_medication_reminder(&reminder)?;
    ctx.state.scheduler.arm_medication(&reminder);
    ctx.state.scheduler.display_now(
        "Reminder Set!",
        &format!(
            "Reminder for {} at {} has been {}.",
            reminder.name,
            reminder.time.format("%H:%M"),
            if updating { "updated" } else { "added" }
        ),
    );

    Ok(Json(reminder))
}

/// `DELETE /api/medications/:id`
pub async fn remove(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    // Cancel before the record goes away.
    ctx.state.scheduler.cancel(id);
    if !ctx.state.store.delete_medication_reminder(id)? {
        return Err(ApiError::NotFound("Reminder not found".into()));
    }
    ctx.state.scheduler.display_now(
        "Reminder Deleted",
        "The reminder has been successfully deleted.",
    );
    Ok(StatusCode::NO_CONTENT)
}
