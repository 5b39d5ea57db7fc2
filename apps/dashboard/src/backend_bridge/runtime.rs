//! Background worker applying persistence commands on the tokio runtime.

use std::thread::{self, JoinHandle};

use anyhow::anyhow;
use crossbeam_channel::{bounded, Receiver};
use storage::ClientRepository;
use tokio::runtime::Handle;
use tracing::{debug, error};

use crate::backend_bridge::{commands::PersistenceCommand, sink::ChannelSink};

pub const PERSISTENCE_QUEUE_CAPACITY: usize = 256;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WorkerReport {
    pub applied: usize,
    pub failed: usize,
}

pub struct PersistenceWorker {
    handle: JoinHandle<WorkerReport>,
}

impl PersistenceWorker {
    /// Waits until every queued command has been applied. The queue closes
    /// once the last [`ChannelSink`] is dropped.
    pub fn finish(self) -> anyhow::Result<WorkerReport> {
        self.handle
            .join()
            .map_err(|_| anyhow!("persistence worker panicked"))
    }
}

pub fn launch<R>(runtime: Handle, repo: R, capacity: usize) -> (ChannelSink, PersistenceWorker)
where
    R: ClientRepository + 'static,
{
    let (cmd_tx, cmd_rx) = bounded::<PersistenceCommand>(capacity);
    let handle = thread::spawn(move || run_worker(&runtime, &repo, cmd_rx));
    (ChannelSink::new(cmd_tx), PersistenceWorker { handle })
}

fn run_worker<R: ClientRepository>(
    runtime: &Handle,
    repo: &R,
    cmd_rx: Receiver<PersistenceCommand>,
) -> WorkerReport {
    let mut report = WorkerReport::default();
    for cmd in cmd_rx.iter() {
        let cmd_name = cmd.name();
        match runtime.block_on(apply_command(repo, cmd)) {
            Ok(()) => report.applied += 1,
            Err(err) => {
                report.failed += 1;
                error!(command = cmd_name, "persistence command failed: {err:#}");
            }
        }
    }
    report
}

pub async fn apply_command<R: ClientRepository + ?Sized>(
    repo: &R,
    cmd: PersistenceCommand,
) -> anyhow::Result<()> {
    match cmd {
        PersistenceCommand::Insert(record) => repo.insert_client(&record).await,
        PersistenceCommand::Delete(id) => {
            if !repo.delete_client(&id).await? {
                debug!(client_id = %id, "client was already absent from storage");
            }
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "../tests/runtime_tests.rs"]
mod tests;
