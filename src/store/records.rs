//! Typed record access over the key-value store.
//!
//! Each list is read, modified, and written back whole — record counts are
//! a handful per user, so a linear scan is the query engine. A mutex
//! serializes read-modify-write cycles so two API calls cannot interleave
//! an update and drop a record.

use std::path::PathBuf;
use std::sync::Mutex;

use uuid::Uuid;

use super::keys;
use super::kv::{FileStore, StoreError};
use crate::models::{Appointment, EmergencyContact, MedicationReminder, VitalRecord};
use crate::notify::Permission;

pub struct RecordStore {
    kv: FileStore,
    write_guard: Mutex<()>,
}

impl RecordStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Ok(Self {
            kv: FileStore::open(root)?,
            write_guard: Mutex::new(()),
        })
    }

    // ── Medication reminders ───────────────────────────────

    pub fn medication_reminders(&self) -> Vec<MedicationReminder> {
        self.kv.read(keys::MEDICATION_REMINDERS)
    }

    /// Insert or replace by id. Ids stay unique within the list.
    pub fn save_medication_reminder(
        &self,
        reminder: &MedicationReminder,
    ) -> Result<(), StoreError> {
        let _guard = self.write_guard.lock();
        let mut reminders = self.medication_reminders();
        match reminders.iter_mut().find(|r| r.id == reminder.id) {
            Some(existing) => *existing = reminder.clone(),
            None => reminders.push(reminder.clone()),
        }
        self.kv.write(keys::MEDICATION_REMINDERS, &reminders)
    }

    /// Returns `true` if a reminder with that id existed.
    pub fn delete_medication_reminder(&self, id: Uuid) -> Result<bool, StoreError> {
        let _guard = self.write_guard.lock();
        let mut reminders = self.medication_reminders();
        let before = reminders.len();
        reminders.retain(|r| r.id != id);
        if reminders.len() == before {
            return Ok(false);
        }
        self.kv.write(keys::MEDICATION_REMINDERS, &reminders)?;
        Ok(true)
    }

    // ── Appointments ───────────────────────────────────────

    pub fn appointments(&self) -> Vec<Appointment> {
        self.kv.read(keys::APPOINTMENTS)
    }

    pub fn save_appointment(&self, appointment: &Appointment) -> Result<(), StoreError> {
        let _guard = self.write_guard.lock();
        let mut appointments = self.appointments();
        match appointments.iter_mut().find(|a| a.id == appointment.id) {
            Some(existing) => *existing = appointment.clone(),
            None => appointments.push(appointment.clone()),
        }
        self.kv.write(keys::APPOINTMENTS, &appointments)
    }

    pub fn delete_appointment(&self, id: Uuid) -> Result<bool, StoreError> {
        let _guard = self.write_guard.lock();
        let mut appointments = self.appointments();
        let before = appointments.len();
        appointments.retain(|a| a.id != id);
        if appointments.len() == before {
            return Ok(false);
        }
        self.kv.write(keys::APPOINTMENTS, &appointments)?;
        Ok(true)
    }

    // ── Vitals (append-only, newest first) ─────────────────

    pub fn vitals(&self) -> Vec<VitalRecord> {
        self.kv.read(keys::HEALTH_VITALS)
    }

    pub fn add_vital(&self, vital: &VitalRecord) -> Result<(), StoreError> {
        let _guard = self.write_guard.lock();
        let mut vitals = self.vitals();
        vitals.insert(0, vital.clone());
        self.kv.write(keys::HEALTH_VITALS, &vitals)
    }

    pub fn delete_vital(&self, id: Uuid) -> Result<bool, StoreError> {
        let _guard = self.write_guard.lock();
        let mut vitals = self.vitals();
        let before = vitals.len();
        vitals.retain(|v| v.id != id);
        if vitals.len() == before {
            return Ok(false);
        }
        self.kv.write(keys::HEALTH_VITALS, &vitals)?;
        Ok(true)
    }

    // ── Emergency contact (singleton) ──────────────────────

    pub fn emergency_contact(&self) -> Option<EmergencyContact> {
        self.kv.read(keys::EMERGENCY_CONTACT)
    }

    pub fn set_emergency_contact(&self, contact: &EmergencyContact) -> Result<(), StoreError> {
        let _guard = self.write_guard.lock();
        self.kv.write(keys::EMERGENCY_CONTACT, &Some(contact.clone()))
    }

    // ── Notification permission ────────────────────────────
    //
    // The browser remembers notification permission across reloads; this
    // store plays that role for the service.

    pub fn notification_permission(&self) -> Permission {
        self.kv.read(keys::NOTIFICATION_PERMISSION)
    }

    pub fn set_notification_permission(&self, permission: Permission) -> Result<(), StoreError> {
        let _guard = self.write_guard.lock();
        self.kv.write(keys::NOTIFICATION_PERMISSION, &permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use crate::models::VitalType;

    fn temp_records() -> (RecordStore, tempfile::TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        let store = RecordStore::open(tmp.path().join("data")).unwrap();
        (store, tmp)
    }

    fn reminder(name: &str) -> MedicationReminder {
        MedicationReminder {
            id: Uuid::new_v4(),
            name: name.into(),
            dosage: "100mg".into(),
            time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            notes: None,
        }
    }

    #[test]
    fn save_inserts_then_replaces_by_id() {
        let (store, _tmp) = temp_records();
        let mut r = reminder("Aspirin");
        store.save_medication_reminder(&r).unwrap();
        r.name = "Aspirin 2".into();
        store.save_medication_reminder(&r).unwrap();

        let reminders = store.medication_reminders();
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].name, "Aspirin 2");
    }

    #[test]
    fn delete_reports_whether_record_existed() {
        let (store, _tmp) = temp_records();
        let r = reminder("Aspirin");
        store.save_medication_reminder(&r).unwrap();
        assert!(store.delete_medication_reminder(r.id).unwrap());
        assert!(!store.delete_medication_reminder(r.id).unwrap());
        assert!(store.medication_reminders().is_empty());
    }

    #[test]
    fn vitals_are_newest_first() {
        let (store, _tmp) = temp_records();
        let older = VitalRecord {
            id: Uuid::new_v4(),
            vital_type: VitalType::Steps,
            value: 4000.0,
            unit: "steps".into(),
            recorded_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        };
        let newer = VitalRecord {
            id: Uuid::new_v4(),
            recorded_at: older.recorded_at + chrono::Duration::hours(1),
            ..older.clone()
        };
        store.add_vital(&older).unwrap();
        store.add_vital(&newer).unwrap();

        let vitals = store.vitals();
        assert_eq!(vitals[0].id, newer.id);
        assert_eq!(vitals[1].id, older.id);
    }

    #[test]
    fn emergency_contact_is_a_singleton() {
        let (store, _tmp) = temp_records();
        assert!(store.emergency_contact().is_none());

        let first = EmergencyContact {
            name: "Jane".into(),
            phone: "911".into(),
            relation: "sibling".into(),
        };
        store.set_emergency_contact(&first).unwrap();
        let second = EmergencyContact {
            name: "Sam".into(),
            ..first.clone()
        };
        store.set_emergency_contact(&second).unwrap();

        assert_eq!(store.emergency_contact().unwrap().name, "Sam");
    }

    #[test]
    fn permission_defaults_until_set() {
        let (store, _tmp) = temp_records();
        assert_eq!(store.notification_permission(), Permission::Default);
        store
            .set_notification_permission(Permission::Granted)
            .unwrap();
        assert_eq!(store.notification_permission(), Permission::Granted);
    }

    #[test]
    fn records_survive_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("data");
        let r = reminder("Aspirin");
        {
            let store = RecordStore::open(root.clone()).unwrap();
            store.save_medication_reminder(&r).unwrap();
        }
        let store = RecordStore::open(root).unwrap();
        assert_eq!(store.medication_reminders()[0].id, r.id);
    }
}
