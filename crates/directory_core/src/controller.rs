//! The single surface the presentation layer binds to.

use shared::{
    domain::{ClientId, ClientRecord, NewClient},
    error::DirectoryResult,
    protocol::{ClientRow, DirectorySnapshot},
};
use tracing::{debug, info};

use crate::{
    actions::{edit_route, profile_route, ActionOutcome, RowAction},
    deletion::{DeletionTicket, DeletionWorkflow},
    filter,
    notify::{
        ChangeSink, NoopSink, Notifier, CLIENT_CREATED_DESCRIPTION, CLIENT_CREATED_TITLE,
        CLIENT_DELETED_DESCRIPTION, CLIENT_DELETED_TITLE,
    },
    store::ClientStore,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionOutcome {
    pub id: ClientId,
    /// `false` when the record was already gone before confirmation.
    pub removed: bool,
}

pub struct DirectoryController<N: Notifier, S: ChangeSink = NoopSink> {
    store: ClientStore,
    workflow: DeletionWorkflow,
    query: String,
    visible_rows: Vec<ClientRecord>,
    notifier: N,
    sink: S,
}

impl<N: Notifier> DirectoryController<N, NoopSink> {
    pub fn new(store: ClientStore, notifier: N) -> Self {
        Self::with_sink(store, notifier, NoopSink)
    }

    pub fn from_records(
        records: impl IntoIterator<Item = ClientRecord>,
        notifier: N,
    ) -> DirectoryResult<Self> {
        Ok(Self::new(ClientStore::from_records(records)?, notifier))
    }
}

impl<N: Notifier, S: ChangeSink> DirectoryController<N, S> {
    pub fn with_sink(store: ClientStore, notifier: N, sink: S) -> Self {
        let mut controller = Self {
            store,
            workflow: DeletionWorkflow::new(),
            query: String::new(),
            visible_rows: Vec::new(),
            notifier,
            sink,
        };
        controller.recompute();
        controller
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
        self.recompute();
    }

    pub fn request_delete(&mut self, id: ClientId) -> DeletionTicket {
        self.workflow.request_delete(id)
    }

    /// Returns `true` if a pending request was dropped.
    pub fn cancel_delete(&mut self) -> bool {
        self.workflow.cancel().is_some()
    }

    pub fn confirm_delete(&mut self) -> Option<DeletionOutcome> {
        let id = self.workflow.confirm()?;
        Some(self.finish_deletion(id))
    }

    /// Confirms only the request identified by `ticket`; a confirmation
    /// from a superseded request is ignored.
    pub fn confirm_delete_ticket(&mut self, ticket: DeletionTicket) -> Option<DeletionOutcome> {
        let id = self.workflow.confirm_ticket(ticket)?;
        Some(self.finish_deletion(id))
    }

    pub fn add_client(&mut self, new: NewClient) -> DirectoryResult<ClientId> {
        let id = self.store.add(new)?;
        self.recompute();

        if let Some(record) = self.store.get(&id) {
            self.sink.client_added(&record);
        }
        info!(client_id = %id, "client created");
        self.notifier
            .notify(CLIENT_CREATED_TITLE, CLIENT_CREATED_DESCRIPTION);
        Ok(id)
    }

    pub fn dispatch(&mut self, id: &ClientId, action: RowAction) -> ActionOutcome {
        if !self.store.contains(id) {
            return ActionOutcome::UnknownClient;
        }
        match action {
            RowAction::ViewProfile => ActionOutcome::Navigate(profile_route(id)),
            RowAction::EditClient => ActionOutcome::Navigate(edit_route(id)),
            RowAction::DeleteClient => {
                ActionOutcome::ConfirmationRequested(self.request_delete(id.clone()))
            }
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn visible_rows(&self) -> &[ClientRecord] {
        &self.visible_rows
    }

    pub fn pending_deletion_id(&self) -> Option<&ClientId> {
        self.workflow.pending_id()
    }

    pub fn pending_ticket(&self) -> Option<DeletionTicket> {
        self.workflow.pending_ticket()
    }

    pub fn total_count(&self) -> usize {
        self.store.len()
    }

    pub fn visible_count(&self) -> usize {
        self.visible_rows.len()
    }

    pub fn get(&self, id: &ClientId) -> Option<ClientRecord> {
        self.store.get(id)
    }

    pub fn list(&self) -> Vec<ClientRecord> {
        self.store.list()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn snapshot(&self) -> DirectorySnapshot {
        DirectorySnapshot {
            query: self.query.clone(),
            rows: self.visible_rows.iter().map(ClientRow::from).collect(),
            pending_deletion_id: self.workflow.pending_id().cloned(),
            total_count: self.total_count(),
            visible_count: self.visible_count(),
        }
    }

    fn finish_deletion(&mut self, id: ClientId) -> DeletionOutcome {
        let removed = self.store.remove(&id);
        self.recompute();

        if removed {
            self.sink.client_removed(&id);
            info!(client_id = %id, "client deleted");
        } else {
            debug!(client_id = %id, "confirmed deletion of a client that was already gone");
        }
        self.notifier
            .notify(CLIENT_DELETED_TITLE, CLIENT_DELETED_DESCRIPTION);
        DeletionOutcome { id, removed }
    }

    fn recompute(&mut self) {
        self.visible_rows = filter::filter(self.store.records(), &self.query);
        debug!(
            query = %self.query,
            visible = self.visible_rows.len(),
            total = self.store.len(),
            "recomputed visible rows"
        );
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
