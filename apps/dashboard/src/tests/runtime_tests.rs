use super::*;

use async_trait::async_trait;
use directory_core::ChangeSink;
use shared::domain::{ClientId, ClientRecord, Money};
use std::sync::{Arc, Mutex};

#[derive(Default, Clone)]
struct MemoryRepository {
    records: Arc<Mutex<Vec<ClientRecord>>>,
}

#[async_trait]
impl ClientRepository for MemoryRepository {
    async fn load_clients(&self) -> anyhow::Result<Vec<ClientRecord>> {
        Ok(self.records.lock().expect("lock").clone())
    }

    async fn insert_client(&self, record: &ClientRecord) -> anyhow::Result<()> {
        let mut records = self.records.lock().expect("lock");
        if records.iter().any(|r| r.id == record.id) {
            return Err(anyhow!("client '{}' already stored", record.id));
        }
        records.push(record.clone());
        Ok(())
    }

    async fn delete_client(&self, id: &ClientId) -> anyhow::Result<bool> {
        let mut records = self.records.lock().expect("lock");
        let before = records.len();
        records.retain(|r| &r.id != id);
        Ok(records.len() != before)
    }
}

fn record(id: &str) -> ClientRecord {
    ClientRecord {
        id: ClientId::from(id),
        name: format!("Client {id}"),
        email: format!("{id}@example.com"),
        phone: String::new(),
        company: String::new(),
        invoice_count: 0,
        total_billed: Money::ZERO,
    }
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("runtime")
}

#[test]
fn delete_of_absent_record_is_not_a_failure() {
    let rt = runtime();
    let repo = MemoryRepository::default();
    rt.block_on(apply_command(
        &repo,
        PersistenceCommand::Delete(ClientId::from("missing")),
    ))
    .expect("soft delete");
}

#[test]
fn worker_applies_queued_commands_in_order_and_drains_on_finish() {
    let rt = runtime();
    let repo = MemoryRepository::default();
    let (sink, worker) = launch(rt.handle().clone(), repo.clone(), 8);

    sink.client_added(&record("1"));
    sink.client_added(&record("2"));
    sink.client_removed(&ClientId::from("1"));
    drop(sink);

    let report = worker.finish().expect("join");
    assert_eq!(
        report,
        WorkerReport {
            applied: 3,
            failed: 0
        }
    );
    let stored = rt.block_on(repo.load_clients()).expect("load");
    assert_eq!(stored, vec![record("2")]);
}

#[test]
fn failed_commands_are_counted_not_fatal() {
    let rt = runtime();
    let repo = MemoryRepository::default();
    let (sink, worker) = launch(rt.handle().clone(), repo.clone(), 8);

    sink.client_added(&record("1"));
    sink.client_added(&record("1"));
    sink.client_added(&record("3"));
    drop(sink);

    let report = worker.finish().expect("join");
    assert_eq!(report.applied, 2);
    assert_eq!(report.failed, 1);
}
