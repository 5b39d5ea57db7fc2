//! Outbound collaborators: user notifications and persistence changes.
//!
//! Both are fire-and-forget. The directory never inspects their outcome
//! and never rolls back an in-memory change because a collaborator failed.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use shared::{
    domain::{ClientId, ClientRecord},
    protocol::Toast,
};
use tracing::info;

pub const CLIENT_DELETED_TITLE: &str = "Client deleted";
pub const CLIENT_DELETED_DESCRIPTION: &str = "The client has been successfully deleted.";
pub const CLIENT_CREATED_TITLE: &str = "Client created";
pub const CLIENT_CREATED_DESCRIPTION: &str = "The client has been added successfully.";

pub const CONFIRM_DELETE_TITLE: &str = "Are you absolutely sure?";
pub const CONFIRM_DELETE_DESCRIPTION: &str =
    "This action cannot be undone. This will permanently delete the client and all associated data.";

pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, description: &str);
}

/// Queue of toasts waiting to be shown. Clones share the same queue, so
/// the presentation layer can keep one handle and drain it after each
/// event while the directory holds another.
#[derive(Debug, Default, Clone)]
pub struct ToastQueue {
    toasts: Arc<Mutex<Vec<Toast>>>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<Toast> {
        let mut toasts = self.toasts.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *toasts)
    }

    pub fn len(&self) -> usize {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, title: &str, description: &str) {
        info!(title, description, "notification queued");
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Toast {
                title: title.to_string(),
                description: description.to_string(),
                shown_at: Utc::now(),
            });
    }
}

/// Receives every committed change so a persistence backend can follow the
/// in-memory store.
pub trait ChangeSink: Send + Sync {
    fn client_added(&self, record: &ClientRecord);
    fn client_removed(&self, id: &ClientId);
}

/// Sink for sessions with no backend attached.
pub struct NoopSink;

impl ChangeSink for NoopSink {
    fn client_added(&self, _record: &ClientRecord) {}

    fn client_removed(&self, _id: &ClientId) {}
}
