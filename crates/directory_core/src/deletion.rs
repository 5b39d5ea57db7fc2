//! Two-step confirmation gate in front of record removal.

use std::mem;

use shared::domain::ClientId;
use tracing::debug;

/// Identity of a single deletion request. A newer request always gets a
/// different ticket, so a confirmation carrying an old ticket can be told
/// apart from one for the request currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeletionTicket(u64);

impl DeletionTicket {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeletionState {
    #[default]
    Idle,
    PendingConfirmation {
        id: ClientId,
        ticket: DeletionTicket,
    },
}

/// At most one deletion is pending at any time; a new request replaces the
/// previous one. The workflow never touches the store itself: confirming
/// hands the id back to the owner, which performs the removal.
#[derive(Debug, Default)]
pub struct DeletionWorkflow {
    state: DeletionState,
    issued: u64,
}

impl DeletionWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DeletionState {
        &self.state
    }

    pub fn pending_id(&self) -> Option<&ClientId> {
        match &self.state {
            DeletionState::Idle => None,
            DeletionState::PendingConfirmation { id, .. } => Some(id),
        }
    }

    pub fn pending_ticket(&self) -> Option<DeletionTicket> {
        match &self.state {
            DeletionState::Idle => None,
            DeletionState::PendingConfirmation { ticket, .. } => Some(*ticket),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, DeletionState::PendingConfirmation { .. })
    }

    pub fn request_delete(&mut self, id: ClientId) -> DeletionTicket {
        self.issued = self.issued.wrapping_add(1);
        let ticket = DeletionTicket(self.issued);

        if let Some(previous) = self.pending_id() {
            debug!(previous = %previous, next = %id, "replacing pending deletion request");
        }
        self.state = DeletionState::PendingConfirmation { id, ticket };
        ticket
    }

    /// Drops the pending request, if any, and returns its id.
    pub fn cancel(&mut self) -> Option<ClientId> {
        self.take_pending()
    }

    /// Returns the id whose removal was confirmed and goes back to idle.
    /// Confirming while idle yields nothing.
    pub fn confirm(&mut self) -> Option<ClientId> {
        self.take_pending()
    }

    /// Like [`DeletionWorkflow::confirm`], but only for the request that
    /// issued `ticket`. A stale ticket leaves the current request in place.
    pub fn confirm_ticket(&mut self, ticket: DeletionTicket) -> Option<ClientId> {
        if self.pending_ticket() != Some(ticket) {
            debug!(ticket = ticket.value(), "ignoring stale deletion confirmation");
            return None;
        }
        self.take_pending()
    }

    fn take_pending(&mut self) -> Option<ClientId> {
        match mem::take(&mut self.state) {
            DeletionState::Idle => None,
            DeletionState::PendingConfirmation { id, .. } => Some(id),
        }
    }
}

#[cfg(test)]
#[path = "tests/deletion_tests.rs"]
mod tests;
