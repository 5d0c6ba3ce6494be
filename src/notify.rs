//! Notification presentation collaborator.
//!
//! Mirrors the browser notification model: a tri-state permission and a
//! `display(title, body)` call that is a no-op unless permission is
//! granted. Display failure is silent — nothing is retried.

use serde::{Deserialize, Serialize};

/// Notification permission, persisted across restarts like the browser's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    Granted,
    Denied,
    #[default]
    Default,
}

impl Permission {
    pub fn as_str(self) -> &'static str {
        match self {
            Permission::Granted => "granted",
            Permission::Denied => "denied",
            Permission::Default => "default",
        }
    }

    /// Outcome of a permission request: undecided becomes granted, a
    /// denial is sticky until the user changes it explicitly.
    pub fn after_request(self) -> Permission {
        match self {
            Permission::Default => Permission::Granted,
            other => other,
        }
    }
}

/// Where fired notifications go. The real UI collaborator is out of
/// process; the service side only needs a display seam it can point at
/// a log, a desktop shell, or a test channel.
pub trait NotificationSink: Send + Sync {
    fn display(&self, title: &str, body: &str);
}

/// Default sink: surface the notification in the service log.
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn display(&self, title: &str, body: &str) {
        tracing::info!(title, body, "notification");
    }
}

/// Test sink capturing (title, body) pairs.
#[cfg(test)]
pub struct ChannelNotifier {
    tx: tokio::sync::mpsc::UnboundedSender<(String, String)>,
}

#[cfg(test)]
impl ChannelNotifier {
    pub fn new() -> (
        Self,
        tokio::sync::mpsc::UnboundedReceiver<(String, String)>,
    ) {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[cfg(test)]
impl NotificationSink for ChannelNotifier {
    fn display(&self, title: &str, body: &str) {
        let _ = self.tx.send((title.to_string(), body.to_string()));
    }
}
