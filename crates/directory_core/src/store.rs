//! Authoritative in-memory collection of client records.

use std::collections::HashSet;

use shared::{
    domain::{ClientId, ClientRecord, NewClient},
    error::{DirectoryError, DirectoryResult},
};
use tracing::debug;

/// Ordered by insertion. All mutation goes through [`ClientStore::add`] and
/// [`ClientStore::remove`]; readers get snapshots or shared borrows.
#[derive(Debug, Default, Clone)]
pub struct ClientStore {
    records: Vec<ClientRecord>,
    ids: HashSet<ClientId>,
}

impl ClientStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from seed or loaded records, keeping their order and
    /// their ids. Existing records never get a generated id.
    pub fn from_records(records: impl IntoIterator<Item = ClientRecord>) -> DirectoryResult<Self> {
        let mut store = Self::new();
        for (position, record) in records.into_iter().enumerate() {
            if record.id.is_blank() {
                return Err(DirectoryError::BlankId { position });
            }
            store.insert(record)?;
        }
        Ok(store)
    }

    /// A blank or missing requested id gets a fresh one.
    pub fn add(&mut self, new: NewClient) -> DirectoryResult<ClientId> {
        let id = match new.requested_id() {
            Some(id) => id.clone(),
            None => self.fresh_id(),
        };
        self.insert(new.into_record(id))
    }

    fn insert(&mut self, record: ClientRecord) -> DirectoryResult<ClientId> {
        if !self.ids.insert(record.id.clone()) {
            return Err(DirectoryError::DuplicateId { id: record.id });
        }
        let id = record.id.clone();
        self.records.push(record);
        debug!(client_id = %id, total = self.records.len(), "client added to store");
        Ok(id)
    }

    /// Returns `false` when the id is already absent.
    pub fn remove(&mut self, id: &ClientId) -> bool {
        if !self.ids.remove(id) {
            return false;
        }
        self.records.retain(|record| &record.id != id);
        debug!(client_id = %id, total = self.records.len(), "client removed from store");
        true
    }

    pub fn list(&self) -> Vec<ClientRecord> {
        self.records.clone()
    }

    pub fn records(&self) -> &[ClientRecord] {
        &self.records
    }

    pub fn get(&self, id: &ClientId) -> Option<ClientRecord> {
        self.records.iter().find(|record| &record.id == id).cloned()
    }

    pub fn contains(&self, id: &ClientId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn fresh_id(&self) -> ClientId {
        loop {
            let id = ClientId::generate();
            if !self.ids.contains(&id) {
                return id;
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
