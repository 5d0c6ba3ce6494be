use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A daily medication reminder. Recurs every day at `time`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicationReminder {
    pub id: Uuid,
    pub name: String,
    pub dosage: String,
    #[serde(with = "super::hhmm")]
    pub time: NaiveTime,
    pub notes: Option<String>,
}

impl MedicationReminder {
    /// Title of the system notification fired when the reminder elapses.
    pub fn notification_title(&self) -> String {
        format!("Medication Reminder: {}", self.name)
    }

    /// Body of the system notification fired when the reminder elapses.
    pub fn notification_body(&self) -> String {
        let dosage = if self.dosage.trim().is_empty() {
            "as prescribed"
        } else {
            self.dosage.as_str()
        };
        let notes = self.notes.as_deref().filter(|n| !n.trim().is_empty());
        format!(
            "Time to take your {} ({}). Notes: {}",
            self.name,
            dosage,
            notes.unwrap_or("None")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reminder(dosage: &str, notes: Option<&str>) -> MedicationReminder {
        MedicationReminder {
            id: Uuid::new_v4(),
            name: "Aspirin".into(),
            dosage: dosage.into(),
            time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            notes: notes.map(String::from),
        }
    }

    #[test]
    fn notification_text_with_dosage_and_notes() {
        let r = reminder("100mg", Some("after breakfast"));
        assert_eq!(r.notification_title(), "Medication Reminder: Aspirin");
        assert_eq!(
            r.notification_body(),
            "Time to take your Aspirin (100mg). Notes: after breakfast"
        );
    }

    #[test]
    fn notification_text_falls_back_when_fields_empty() {
        let r = reminder("", None);
        assert_eq!(
            r.notification_body(),
            "Time to take your Aspirin (as prescribed). Notes: None"
        );
    }

    #[test]
    fn serializes_time_as_hhmm() {
        let r = reminder("100mg", None);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["time"], "08:00");
    }
}
