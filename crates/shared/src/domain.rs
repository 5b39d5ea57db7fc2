use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(pub String);

impl ClientId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClientId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ClientId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Billed amount in cents. The whole directory shares one currency (USD).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(pub u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub fn from_dollars(dollars: u64) -> Self {
        Self(dollars.saturating_mul(100))
    }

    pub fn cents(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "${}.{:02}",
            group_thousands(self.0 / 100),
            self.0 % 100
        )
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub id: ClientId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub invoice_count: u32,
    pub total_billed: Money,
}

impl ClientRecord {
    pub fn invoices_label(&self) -> String {
        format!("{} invoices", self.invoice_count)
    }
}

/// A record as handed over by the creation form, before the store has
/// settled its id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClient {
    #[serde(default)]
    pub id: Option<ClientId>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub invoice_count: u32,
    #[serde(default)]
    pub total_billed: Money,
}

impl NewClient {
    pub fn from_form(
        first_name: &str,
        last_name: &str,
        email: &str,
        phone: &str,
        company: &str,
    ) -> Self {
        let name = [first_name.trim(), last_name.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            id: None,
            name,
            email: email.trim().to_string(),
            phone: phone.trim().to_string(),
            company: company.trim().to_string(),
            invoice_count: 0,
            total_billed: Money::ZERO,
        }
    }

    pub fn with_id(mut self, id: impl Into<ClientId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Caller-supplied id, ignoring blank values.
    pub fn requested_id(&self) -> Option<&ClientId> {
        self.id.as_ref().filter(|id| !id.is_blank())
    }

    pub fn into_record(self, id: ClientId) -> ClientRecord {
        ClientRecord {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            company: self.company,
            invoice_count: self.invoice_count,
            total_billed: self.total_billed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_money_with_thousands_separators() {
        assert_eq!(Money::from_cents(0).to_string(), "$0.00");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_dollars(999).to_string(), "$999.00");
        assert_eq!(Money::from_dollars(24_750).to_string(), "$24,750.00");
        assert_eq!(Money::from_cents(123_456_789).to_string(), "$1,234,567.89");
    }

    #[test]
    fn form_input_joins_name_parts() {
        let new = NewClient::from_form(" Ada ", "Lovelace", "ada@example.com ", "", "");
        assert_eq!(new.name, "Ada Lovelace");
        assert_eq!(new.email, "ada@example.com");
        assert_eq!(new.invoice_count, 0);
        assert_eq!(new.total_billed, Money::ZERO);
        assert!(new.id.is_none());

        let only_first = NewClient::from_form("Cher", "  ", "cher@example.com", "", "");
        assert_eq!(only_first.name, "Cher");
    }

    #[test]
    fn blank_requested_id_counts_as_missing() {
        let new = NewClient::default().with_id("   ");
        assert!(new.requested_id().is_none());

        let new = NewClient::default().with_id("7");
        assert_eq!(new.requested_id(), Some(&ClientId::from("7")));
    }

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(ClientId::generate(), ClientId::generate());
    }
}
