//! Persistence commands queued from the directory to the backend worker.

use shared::domain::{ClientId, ClientRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceCommand {
    Insert(ClientRecord),
    Delete(ClientId),
}

impl PersistenceCommand {
    pub fn name(&self) -> &'static str {
        match self {
            PersistenceCommand::Insert(_) => "insert_client",
            PersistenceCommand::Delete(_) => "delete_client",
        }
    }
}
