//! Demo directory used when no persisted records exist yet.

use shared::domain::{ClientId, ClientRecord, Money};

pub fn demo_clients() -> Vec<ClientRecord> {
    vec![
        client(
            "1",
            "Jane Smith",
            "jane@apple.com",
            "(555) 123-4567",
            "Apple Inc.",
            12,
            24_750,
        ),
        client(
            "2",
            "John Doe",
            "john@google.com",
            "(555) 987-6543",
            "Google LLC",
            8,
            16_320,
        ),
        client(
            "3",
            "Sarah Johnson",
            "sarah@microsoft.com",
            "(555) 456-7890",
            "Microsoft Corporation",
            5,
            9_840,
        ),
        client(
            "4",
            "Michael Brown",
            "michael@amazon.com",
            "(555) 321-6547",
            "Amazon.com Inc.",
            3,
            5_260,
        ),
    ]
}

fn client(
    id: &str,
    name: &str,
    email: &str,
    phone: &str,
    company: &str,
    invoice_count: u32,
    total_billed_dollars: u64,
) -> ClientRecord {
    ClientRecord {
        id: ClientId::from(id),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        company: company.to_string(),
        invoice_count,
        total_billed: Money::from_dollars(total_billed_dollars),
    }
}
