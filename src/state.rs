//! Shared application state: record store, notification scheduler,
//! permission, and the (optional) assistant session.

use std::sync::{Arc, RwLock};

use tokio::sync::Mutex;

use crate::assistant::{ChatSession, GeminiClient};
use crate::notify::{NotificationSink, Permission};
use crate::scheduler::ReminderScheduler;
use crate::store::{RecordStore, StoreError};

pub struct AppState {
    pub store: RecordStore,
    pub scheduler: ReminderScheduler,
    /// Mutex rather than RwLock: at most one chat request in flight.
    pub assistant: Option<Mutex<ChatSession>>,
    permission: Arc<RwLock<Permission>>,
}

impl AppState {
    /// Build state around an opened record store. `client` is `None` when
    /// no API credential is configured; chat endpoints then report the
    /// assistant unavailable. The persisted notification permission is
    /// loaded here; timers are armed by the caller via
    /// `scheduler.rearm_all`.
    pub fn new(
        store: RecordStore,
        sink: Arc<dyn NotificationSink>,
        client: Option<GeminiClient>,
    ) -> Self {
        let permission = Arc::new(RwLock::new(store.notification_permission()));
        let scheduler = ReminderScheduler::new(sink, Arc::clone(&permission));
        Self {
            store,
            scheduler,
            assistant: client.map(|c| Mutex::new(ChatSession::new(c))),
            permission,
        }
    }

    pub fn permission(&self) -> Permission {
        self.permission
            .read()
            .map(|p| *p)
            .unwrap_or(Permission::Denied)
    }

    /// Update and persist notification permission. The caller re-arms
    /// timers when this flips to granted.
    pub fn set_permission(&self, permission: Permission) -> Result<(), StoreError> {
        if let Ok(mut current) = self.permission.write() {
            *current = permission;
        }
        self.store.set_notification_permission(permission)
    }

    pub fn assistant_available(&self) -> bool {
        self.assistant.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::LogNotifier;

    fn temp_state() -> (AppState, tempfile::TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        let store = RecordStore::open(tmp.path().join("data")).unwrap();
        let state = AppState::new(store, Arc::new(LogNotifier), None);
        (state, tmp)
    }

    #[test]
    fn permission_starts_at_stored_value() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("data");
        {
            let store = RecordStore::open(root.clone()).unwrap();
            store
                .set_notification_permission(Permission::Granted)
                .unwrap();
        }
        let store = RecordStore::open(root).unwrap();
        let state = AppState::new(store, Arc::new(LogNotifier), None);
        assert_eq!(state.permission(), Permission::Granted);
    }

    #[test]
    fn set_permission_persists() {
        let (state, _tmp) = temp_state();
        assert_eq!(state.permission(), Permission::Default);
        state.set_permission(Permission::Granted).unwrap();
        assert_eq!(state.permission(), Permission::Granted);
        assert_eq!(
            state.store.notification_permission(),
            Permission::Granted
        );
    }

    #[test]
    fn assistant_absent_without_credential() {
        let (state, _tmp) = temp_state();
        assert!(!state.assistant_available());
    }
}
