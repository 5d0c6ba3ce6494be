//! Data model for user-entered health records.
//!
//! All records are plain serde structs persisted as JSON through the
//! record store. Ids are UUIDv4; times are wall-clock (no timezone is
//! stored — reminders fire in the machine's local time).

pub mod appointment;
pub mod contact;
pub mod conversation;
pub mod medication;
pub mod vital;

pub use appointment::Appointment;
pub use contact::EmergencyContact;
pub use conversation::{ChatMessage, ChatRole};
pub use medication::MedicationReminder;
pub use vital::{VitalRecord, VitalType};

/// Serde adapter for `HH:MM` wall-clock times.
///
/// `chrono::NaiveTime` serializes with seconds by default; record times
/// are entered and displayed as `HH:MM`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M").map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct Wrapper {
        #[serde(with = "super::hhmm")]
        time: NaiveTime,
    }

    #[test]
    fn hhmm_roundtrip_without_seconds() {
        let w = Wrapper {
            time: NaiveTime::from_hms_opt(8, 5, 0).unwrap(),
        };
        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(json, r#"{"time":"08:05"}"#);
        let back: Wrapper = serde_json::from_str(&json).unwrap();
        assert_eq!(back.time, w.time);
    }

    #[test]
    fn hhmm_rejects_garbage() {
        let err = serde_json::from_str::<Wrapper>(r#"{"time":"25:99"}"#);
        assert!(err.is_err());
    }
}
