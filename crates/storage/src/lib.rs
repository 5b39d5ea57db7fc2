use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use shared::domain::{ClientId, ClientRecord, Money};

const LOAD_CLIENTS: &str = "SELECT id, name, email, phone, company, invoice_count, total_billed_cents, created_at
     FROM clients
     ORDER BY position ASC";

const GET_CLIENT: &str = "SELECT id, name, email, phone, company, invoice_count, total_billed_cents, created_at
     FROM clients
     WHERE id = ?";

const INSERT_CLIENT: &str =
    "INSERT INTO clients (id, name, email, phone, company, invoice_count, total_billed_cents)
     VALUES (?, ?, ?, ?, ?, ?, ?)";

/// Load/save interface the directory's persistence collaborator exposes.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn load_clients(&self) -> Result<Vec<ClientRecord>>;
    async fn insert_client(&self, record: &ClientRecord) -> Result<()>;
    async fn delete_client(&self, id: &ClientId) -> Result<bool>;
}

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

#[derive(Debug, Clone)]
pub struct StoredClient {
    pub record: ClientRecord,
    pub created_at: DateTime<Utc>,
}

impl Storage {
    /// Opens (creating if needed) the database at `database_url`, which may
    /// also be a plain file path.
    pub async fn new(database_url: &str) -> Result<Self> {
        let database_url = normalize_database_url(database_url);
        let database_url = database_url.as_str();
        ensure_sqlite_parent_dir_exists(database_url)?;

        // Every connection to `sqlite::memory:` opens its own database.
        let max_connections = if database_url.starts_with("sqlite::memory:") {
            1
        } else {
            5
        };

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(connect_options)
            .await
            .with_context(|| format!("failed to open database '{database_url}'"))?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    /// All clients in the order they were first inserted.
    pub async fn load_stored_clients(&self) -> Result<Vec<StoredClient>> {
        let rows = sqlx::query(LOAD_CLIENTS)
            .fetch_all(&self.pool)
            .await
            .context("failed to load clients")?;

        rows.iter().map(stored_client_from_row).collect()
    }

    pub async fn load_clients(&self) -> Result<Vec<ClientRecord>> {
        Ok(self
            .load_stored_clients()
            .await?
            .into_iter()
            .map(|stored| stored.record)
            .collect())
    }

    pub async fn get_client(&self, id: &ClientId) -> Result<Option<StoredClient>> {
        let row = sqlx::query(GET_CLIENT)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("failed to load client '{id}'"))?;

        row.as_ref().map(stored_client_from_row).transpose()
    }

    pub async fn insert_client(&self, record: &ClientRecord) -> Result<()> {
        let cents = i64::try_from(record.total_billed.cents())
            .context("total billed amount does not fit in sqlite integer")?;

        sqlx::query(INSERT_CLIENT)
            .bind(record.id.as_str())
            .bind(&record.name)
            .bind(&record.email)
            .bind(&record.phone)
            .bind(&record.company)
            .bind(i64::from(record.invoice_count))
            .bind(cents)
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to insert client '{}'", record.id))?;
        Ok(())
    }

    /// Returns `false` when no row had that id.
    pub async fn delete_client(&self, id: &ClientId) -> Result<bool> {
        let deleted = sqlx::query("DELETE FROM clients WHERE id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to delete client '{id}'"))?
            .rows_affected();
        Ok(deleted > 0)
    }

    pub async fn count_clients(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clients")
            .fetch_one(&self.pool)
            .await
            .context("failed to count clients")?;
        Ok(count)
    }

    /// Inserts `records` in one transaction if the table is empty. Returns
    /// whether anything was written.
    pub async fn seed_if_empty(&self, records: &[ClientRecord]) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clients")
            .fetch_one(&mut *tx)
            .await?;
        if existing > 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        for record in records {
            let cents = i64::try_from(record.total_billed.cents())
                .context("total billed amount does not fit in sqlite integer")?;
            sqlx::query(INSERT_CLIENT)
                .bind(record.id.as_str())
                .bind(&record.name)
                .bind(&record.email)
                .bind(&record.phone)
                .bind(&record.company)
                .bind(i64::from(record.invoice_count))
                .bind(cents)
                .execute(&mut *tx)
                .await
                .with_context(|| format!("failed to seed client '{}'", record.id))?;
        }

        tx.commit().await?;
        Ok(true)
    }
}

#[async_trait]
impl ClientRepository for Storage {
    async fn load_clients(&self) -> Result<Vec<ClientRecord>> {
        Storage::load_clients(self).await
    }

    async fn insert_client(&self, record: &ClientRecord) -> Result<()> {
        Storage::insert_client(self, record).await
    }

    async fn delete_client(&self, id: &ClientId) -> Result<bool> {
        Storage::delete_client(self, id).await
    }
}

fn stored_client_from_row(row: &SqliteRow) -> Result<StoredClient> {
    let id: String = row.try_get("id")?;
    let invoice_count: i64 = row.try_get("invoice_count")?;
    let cents: i64 = row.try_get("total_billed_cents")?;

    let invoice_count = u32::try_from(invoice_count)
        .with_context(|| format!("client '{id}' has invalid invoice count {invoice_count}"))?;
    let cents = u64::try_from(cents)
        .with_context(|| format!("client '{id}' has negative billed amount {cents}"))?;

    Ok(StoredClient {
        record: ClientRecord {
            id: ClientId(id),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            company: row.try_get("company")?,
            invoice_count,
            total_billed: Money::from_cents(cents),
        },
        created_at: row.try_get("created_at")?,
    })
}

/// Accepts a sqlite URL or a bare file path and returns a URL sqlx can open.
pub fn normalize_database_url(raw: &str) -> String {
    let raw = raw.trim();
    if raw.contains("://") || raw.starts_with("sqlite::memory:") {
        return raw.to_string();
    }
    let path = raw.strip_prefix("sqlite:").unwrap_or(raw).replace('\\', "/");
    format!("sqlite://{path}")
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(parent) = sqlite_path(database_url)
        .as_deref()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
    else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(&parent)
        .with_context(|| format!("failed to create database directory '{}'", parent.display()))
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url.starts_with("sqlite::memory:") {
        return None;
    }
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split_once('?').map_or(rest, |(path, _)| path);
    (!path.is_empty()).then(|| PathBuf::from(path))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
