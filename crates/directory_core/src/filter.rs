//! Free-text filtering of the client list.
//!
//! A record matches when the query occurs, ignoring case, in its name,
//! email or company. Phone numbers never take part in matching. A blank
//! query matches every record. Output keeps input order.

use shared::domain::ClientRecord;

pub fn filter(records: &[ClientRecord], query: &str) -> Vec<ClientRecord> {
    match normalize_query(query) {
        None => records.to_vec(),
        Some(needle) => records
            .iter()
            .filter(|record| record_matches(record, &needle))
            .cloned()
            .collect(),
    }
}

pub fn matches(record: &ClientRecord, query: &str) -> bool {
    match normalize_query(query) {
        None => true,
        Some(needle) => record_matches(record, &needle),
    }
}

fn normalize_query(query: &str) -> Option<String> {
    if query.trim().is_empty() {
        None
    } else {
        Some(query.to_lowercase())
    }
}

fn record_matches(record: &ClientRecord, needle: &str) -> bool {
    [&record.name, &record.email, &record.company]
        .into_iter()
        .any(|field| field.to_lowercase().contains(needle))
}

#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod tests;
