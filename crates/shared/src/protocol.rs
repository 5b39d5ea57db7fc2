use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ClientId, ClientRecord};

pub const EMPTY_DIRECTORY_MESSAGE: &str = "No clients found.";

/// One rendered row of the client table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRow {
    #[serde(flatten)]
    pub record: ClientRecord,
    pub total_billed_display: String,
    pub invoices_label: String,
}

impl From<&ClientRecord> for ClientRow {
    fn from(record: &ClientRecord) -> Self {
        Self {
            record: record.clone(),
            total_billed_display: record.total_billed.to_string(),
            invoices_label: record.invoices_label(),
        }
    }
}

/// Everything the presentation layer binds to, captured at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorySnapshot {
    pub query: String,
    pub rows: Vec<ClientRow>,
    pub pending_deletion_id: Option<ClientId>,
    pub total_count: usize,
    pub visible_count: usize,
}

impl DirectorySnapshot {
    /// "Showing X of Y clients", only rendered while rows are visible.
    pub fn footer(&self) -> Option<String> {
        (self.visible_count > 0).then(|| {
            format!(
                "Showing {} of {} clients",
                self.visible_count, self.total_count
            )
        })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub shown_at: DateTime<Utc>,
}
