use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Type of manually tracked vital.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalType {
    Steps,
    HeartRate,
    Glucose,
}

impl VitalType {
    pub fn as_str(self) -> &'static str {
        match self {
            VitalType::Steps => "steps",
            VitalType::HeartRate => "heart_rate",
            VitalType::Glucose => "glucose",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "steps" => Some(VitalType::Steps),
            "heart_rate" => Some(VitalType::HeartRate),
            "glucose" => Some(VitalType::Glucose),
            _ => None,
        }
    }

    /// Default unit for this vital type.
    pub fn default_unit(self) -> &'static str {
        match self {
            VitalType::Steps => "steps",
            VitalType::HeartRate => "bpm",
            VitalType::Glucose => "mg/dL",
        }
    }
}

/// A single manually recorded vital. Vitals are append-only, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitalRecord {
    pub id: Uuid,
    pub vital_type: VitalType,
    pub value: f64,
    pub unit: String,
    pub recorded_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vital_type_roundtrips_through_str() {
        for t in [VitalType::Steps, VitalType::HeartRate, VitalType::Glucose] {
            assert_eq!(VitalType::from_str(t.as_str()), Some(t));
        }
        assert_eq!(VitalType::from_str("blood_pressure"), None);
    }

    #[test]
    fn default_units_match_tracker() {
        assert_eq!(VitalType::Steps.default_unit(), "steps");
        assert_eq!(VitalType::HeartRate.default_unit(), "bpm");
        assert_eq!(VitalType::Glucose.default_unit(), "mg/dL");
    }

    #[test]
    fn serializes_type_as_snake_case() {
        let json = serde_json::to_value(VitalType::HeartRate).unwrap();
        assert_eq!(json, "heart_rate");
    }
}
