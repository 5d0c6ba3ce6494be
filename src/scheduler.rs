//! Notification scheduler.
//!
//! For each reminder/appointment record, computes the next future fire
//! instant and arms a one-shot delayed task that requests a notification
//! display. The timer map is process-local: restarts drop every armed
//! timer, and `rearm_all` rebuilds the map from the record store at
//! startup and whenever permission flips to granted.
//!
//! Fire-time policy:
//! - Medication reminders recur daily: next occurrence of `time` today,
//!   rolled to tomorrow when already past.
//! - Appointments fire once, 1 hour before the appointment; when that is
//!   already past, 10 minutes before; when that is also past, ~1 second
//!   from now; when the appointment itself is past, nothing is armed and
//!   a warning is logged.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use chrono::{Duration, Local, NaiveDateTime, NaiveTime};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::models::{Appointment, MedicationReminder};
use crate::notify::{NotificationSink, Permission};
use crate::store::RecordStore;

/// Next fire instant for a daily medication reminder: today at `time` if
/// that is still ahead of `now`, otherwise tomorrow at `time`.
pub fn next_medication_instant(now: NaiveDateTime, time: NaiveTime) -> NaiveDateTime {
    let today = now.date().and_time(time);
    if today > now {
        today
    } else {
        today + Duration::days(1)
    }
}

/// Reminder instant for an appointment at `appointment_at`, applying the
/// 1h → 10min → ~1s fallback offsets. `None` when the appointment itself
/// is already past.
pub fn appointment_reminder_instant(
    now: NaiveDateTime,
    appointment_at: NaiveDateTime,
) -> Option<NaiveDateTime> {
    let hour_before = appointment_at - Duration::hours(1);
    if hour_before > now {
        return Some(hour_before);
    }
    let ten_minutes_before = appointment_at - Duration::minutes(10);
    if ten_minutes_before > now {
        return Some(ten_minutes_before);
    }
    if appointment_at > now {
        return Some(now + Duration::seconds(1));
    }
    None
}

type TimerMap = Arc<Mutex<HashMap<Uuid, JoinHandle<()>>>>;

/// Arms and cancels delayed notification tasks, one per record id.
pub struct ReminderScheduler {
    timers: TimerMap,
    sink: Arc<dyn NotificationSink>,
    permission: Arc<RwLock<Permission>>,
}

impl ReminderScheduler {
    pub fn new(sink: Arc<dyn NotificationSink>, permission: Arc<RwLock<Permission>>) -> Self {
        Self {
            timers: Arc::new(Mutex::new(HashMap::new())),
            sink,
            permission,
        }
    }

    fn granted(&self) -> bool {
        self.permission
            .read()
            .map(|p| *p == Permission::Granted)
            .unwrap_or(false)
    }

    /// Display a notification right now, subject to permission.
    /// Used for save/delete confirmations.
    pub fn display_now(&self, title: &str, body: &str) {
        if self.granted() {
            self.sink.display(title, body);
        }
    }

    /// Arm the daily reminder for a medication. No-op without permission.
    pub fn arm_medication(&self, reminder: &MedicationReminder) {
        if !self.granted() {
            return;
        }
        let now = Local::now().naive_local();
        let fire_at = next_medication_instant(now, reminder.time);
        tracing::debug!(name = %reminder.name, %fire_at, "arming medication reminder");
        self.arm(
            reminder.id,
            fire_at - now,
            reminder.notification_title(),
            reminder.notification_body(),
        );
    }

    /// Arm the pre-appointment reminder. No-op without permission or when
    /// the appointment is already past.
    pub fn arm_appointment(&self, appointment: &Appointment) {
        if !self.granted() {
            return;
        }
        let now = Local::now().naive_local();
        let Some(fire_at) = appointment_reminder_instant(now, appointment.instant()) else {
            tracing::warn!(
                title = %appointment.title,
                at = %appointment.instant(),
                "appointment time is in the past, no notification scheduled"
            );
            return;
        };
        tracing::debug!(title = %appointment.title, %fire_at, "arming appointment reminder");
        self.arm(
            appointment.id,
            fire_at - now,
            appointment.notification_title(),
            appointment.notification_body(),
        );
    }

    /// At most one live timer per id: any previous timer for `id` is
    /// cancelled before the new one is armed.
    fn arm(&self, id: Uuid, delay: Duration, title: String, body: String) {
        self.cancel(id);

        let delay = delay.to_std().unwrap_or(std::time::Duration::ZERO);
        let timers = Arc::clone(&self.timers);
        let sink = Arc::clone(&self.sink);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            sink.display(&title, &body);
            if let Ok(mut map) = timers.lock() {
                map.remove(&id);
            }
        });

        if let Ok(mut map) = self.timers.lock() {
            map.insert(id, handle);
        }
    }

    /// Cancel the timer for `id`, if one is armed. Returns whether a
    /// timer was cancelled.
    pub fn cancel(&self, id: Uuid) -> bool {
        let Ok(mut map) = self.timers.lock() else {
            return false;
        };
        match map.remove(&id) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Re-arm timers for every stored record. Called at startup and when
    /// permission changes to granted, since the timer map does not
    /// survive a restart.
    pub fn rearm_all(&self, store: &RecordStore) {
        if !self.granted() {
            return;
        }
        let reminders = store.medication_reminders();
        let appointments = store.appointments();
        for reminder in &reminders {
            self.arm_medication(reminder);
        }
        for appointment in &appointments {
            self.arm_appointment(appointment);
        }
        tracing::info!(
            reminders = reminders.len(),
            appointments = appointments.len(),
            armed = self.armed_count(),
            "re-armed notification timers"
        );
    }

    /// Number of currently armed timers.
    pub fn armed_count(&self) -> usize {
        self.timers.lock().map(|m| m.len()).unwrap_or(0)
    }

    /// Abort every armed timer. Teardown only.
    pub fn shutdown(&self) {
        let Ok(mut map) = self.timers.lock() else {
            return;
        };
        for (_, handle) in map.drain() {
            handle.abort();
        }
    }
}
