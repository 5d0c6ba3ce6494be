//! Persistence layer.
//!
//! Records live in a per-user key-value store: one JSON document per key,
//! written to disk under the application data directory. There is no
//! indexing, no querying beyond a linear scan, and no schema migration —
//! malformed stored JSON is treated as empty/default.

pub mod kv;
pub mod records;

pub use kv::{FileStore, StoreError};
pub use records::RecordStore;

/// Storage keys. One JSON document each.
pub mod keys {
    pub const MEDICATION_REMINDERS: &str = "medication_reminders";
    pub const APPOINTMENTS: &str = "appointments";
    pub const HEALTH_VITALS: &str = "health_vitals";
    pub const EMERGENCY_CONTACT: &str = "emergency_contact";
    pub const NOTIFICATION_PERMISSION: &str = "notification_permission";
}
