use serde::{Deserialize, Serialize};

/// The user's emergency contact. At most one per user; no id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    pub phone: String,
    pub relation: String,
}
