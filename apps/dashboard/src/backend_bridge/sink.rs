//! Change sink that hands directory mutations to the backend queue.

use crossbeam_channel::{Sender, TrySendError};
use directory_core::ChangeSink;
use shared::domain::{ClientId, ClientRecord};

use crate::backend_bridge::commands::PersistenceCommand;

pub struct ChannelSink {
    cmd_tx: Sender<PersistenceCommand>,
}

impl ChannelSink {
    pub fn new(cmd_tx: Sender<PersistenceCommand>) -> Self {
        Self { cmd_tx }
    }

    fn dispatch(&self, cmd: PersistenceCommand) {
        let cmd_name = cmd.name();
        match self.cmd_tx.try_send(cmd) {
            Ok(()) => tracing::debug!(command = cmd_name, "queued persistence command"),
            Err(TrySendError::Full(_)) => {
                tracing::warn!(
                    command = cmd_name,
                    "persistence queue is full; change kept in memory only"
                );
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::warn!(
                    command = cmd_name,
                    "persistence worker disconnected; change kept in memory only"
                );
            }
        }
    }
}

impl ChangeSink for ChannelSink {
    fn client_added(&self, record: &ClientRecord) {
        self.dispatch(PersistenceCommand::Insert(record.clone()));
    }

    fn client_removed(&self, id: &ClientId) {
        self.dispatch(PersistenceCommand::Delete(id.clone()));
    }
}
