use shared::domain::{ClientId, ClientRecord, Money};
use storage::Storage;

fn record(id: &str, name: &str) -> ClientRecord {
    ClientRecord {
        id: ClientId::from(id),
        name: name.to_string(),
        email: format!("{id}@example.com"),
        phone: String::new(),
        company: "Acme".to_string(),
        invoice_count: 3,
        total_billed: Money::from_dollars(5_260),
    }
}

#[tokio::test]
async fn creates_nested_database_file_and_survives_reopen() {
    let temp = tempfile::tempdir().expect("tempdir");
    let db_path = temp.path().join("nested").join("clients.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    {
        let storage = Storage::new(&database_url).await.expect("open");
        storage.insert_client(&record("1", "First")).await.expect("1");
        storage.insert_client(&record("2", "Second")).await.expect("2");
        assert!(storage
            .delete_client(&ClientId::from("1"))
            .await
            .expect("delete"));
        storage.pool().close().await;
    }

    assert!(
        db_path.exists(),
        "database file should exist: {}",
        db_path.display()
    );

    let reopened = Storage::new(&database_url).await.expect("reopen");
    let loaded = reopened.load_clients().await.expect("load");
    assert_eq!(loaded, vec![record("2", "Second")]);
}
