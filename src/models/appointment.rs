use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single-occurrence appointment. Not recurring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub title: String,
    pub doctor: String,
    pub date: NaiveDate,
    #[serde(with = "super::hhmm")]
    pub time: NaiveTime,
    pub notes: Option<String>,
}

impl Appointment {
    /// The appointment's date and time combined into one instant.
    pub fn instant(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    pub fn notification_title(&self) -> String {
        format!("Appointment Reminder: {}", self.title)
    }

    pub fn notification_body(&self) -> String {
        let doctor = if self.doctor.trim().is_empty() {
            "your doctor"
        } else {
            self.doctor.as_str()
        };
        let notes = self.notes.as_deref().filter(|n| !n.trim().is_empty());
        format!(
            "Your appointment for {} with {} is at {} on {}. Notes: {}",
            self.title,
            doctor,
            self.time.format("%H:%M"),
            self.date.format("%Y-%m-%d"),
            notes.unwrap_or("None")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn appointment(doctor: &str) -> Appointment {
        Appointment {
            id: Uuid::new_v4(),
            title: "Annual checkup".into(),
            doctor: doctor.into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            time: NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
            notes: None,
        }
    }

    #[test]
    fn instant_combines_date_and_time() {
        let a = appointment("Dr. Lee");
        assert_eq!(
            a.instant(),
            NaiveDate::from_ymd_opt(2024, 1, 10)
                .unwrap()
                .and_hms_opt(15, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn notification_body_names_the_doctor() {
        let a = appointment("Dr. Lee");
        assert_eq!(
            a.notification_body(),
            "Your appointment for Annual checkup with Dr. Lee is at 15:00 on 2024-01-10. Notes: None"
        );
    }

    #[test]
    fn notification_body_falls_back_without_doctor() {
        let a = appointment("");
        assert!(a.notification_body().contains("with your doctor"));
    }
}
