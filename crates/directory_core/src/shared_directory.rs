//! Thread-safe handle for hosts that drive the directory from more than
//! one thread. The store and the deletion workflow sit behind one lock, so
//! every transition is observed atomically by readers of the view.

use std::sync::{Arc, Mutex, PoisonError};

use shared::{
    domain::{ClientId, NewClient},
    error::DirectoryResult,
    protocol::DirectorySnapshot,
};

use crate::{
    controller::{DeletionOutcome, DirectoryController},
    deletion::DeletionTicket,
    notify::{ChangeSink, NoopSink, Notifier},
};

pub struct SharedDirectory<N: Notifier, S: ChangeSink = NoopSink> {
    inner: Arc<Mutex<DirectoryController<N, S>>>,
}

impl<N: Notifier, S: ChangeSink> Clone for SharedDirectory<N, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<N: Notifier, S: ChangeSink> SharedDirectory<N, S> {
    pub fn new(controller: DirectoryController<N, S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    /// Runs `f` inside the directory's critical section.
    pub fn with<R>(&self, f: impl FnOnce(&mut DirectoryController<N, S>) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    pub fn set_query(&self, text: impl Into<String>) {
        let text = text.into();
        self.with(|directory| directory.set_query(text));
    }

    pub fn request_delete(&self, id: ClientId) -> DeletionTicket {
        self.with(|directory| directory.request_delete(id))
    }

    pub fn cancel_delete(&self) -> bool {
        self.with(|directory| directory.cancel_delete())
    }

    pub fn confirm_delete(&self) -> Option<DeletionOutcome> {
        self.with(|directory| directory.confirm_delete())
    }

    pub fn confirm_delete_ticket(&self, ticket: DeletionTicket) -> Option<DeletionOutcome> {
        self.with(|directory| directory.confirm_delete_ticket(ticket))
    }

    pub fn add_client(&self, new: NewClient) -> DirectoryResult<ClientId> {
        self.with(|directory| directory.add_client(new))
    }

    pub fn snapshot(&self) -> DirectorySnapshot {
        self.with(|directory| directory.snapshot())
    }
}

#[cfg(test)]
#[path = "tests/shared_directory_tests.rs"]
mod tests;
