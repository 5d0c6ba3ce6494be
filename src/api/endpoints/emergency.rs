//! Emergency contact endpoints. A single contact per user, no id.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::EmergencyContact;

/// `GET /api/emergency-contact` — 404 until a contact is configured,
/// which the UI turns into its "configure your emergency contact first"
/// prompt.
pub async fn current(
    State(ctx): State<ApiContext>,
) -> Result<Json<EmergencyContact>, ApiError> {
    ctx.state
        .store
        .emergency_contact()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("No emergency contact set".into()))
}

#[derive(Deserialize)]
pub struct SaveContactRequest {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub relation: String,
}

/// `PUT /api/emergency-contact`
pub async fn save(
    State(ctx): State<ApiContext>,
    Json(req): Json<SaveContactRequest>,
) -> Result<Json<EmergencyContact>, ApiError> {
    let name = req.name.trim();
    let phone = req.phone.trim();
    if name.is_empty() || phone.is_empty() {
        return Err(ApiError::BadRequest(
            "Name and phone number are required".into(),
        ));
    }

    let contact = EmergencyContact {
        name: name.to_string(),
        phone: phone.to_string(),
        relation: req.relation.trim().to_string(),
    };
    ctx.state.store.set_emergency_contact(&contact)?;
    Ok(Json(contact))
}
