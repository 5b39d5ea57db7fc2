//! Per-row action menu and the routes it leads to.

use shared::domain::ClientId;

use crate::deletion::DeletionTicket;

pub const CLIENTS_ROUTE: &str = "/clients";
pub const CREATE_CLIENT_ROUTE: &str = "/clients/create";

pub fn profile_route(id: &ClientId) -> String {
    format!("{CLIENTS_ROUTE}/{id}")
}

pub fn edit_route(id: &ClientId) -> String {
    format!("{CLIENTS_ROUTE}/{id}/edit")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    ViewProfile,
    EditClient,
    DeleteClient,
}

impl RowAction {
    pub const ALL: [RowAction; 3] = [
        RowAction::ViewProfile,
        RowAction::EditClient,
        RowAction::DeleteClient,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RowAction::ViewProfile => "View Profile",
            RowAction::EditClient => "Edit Client",
            RowAction::DeleteClient => "Delete Client",
        }
    }

    pub fn is_destructive(self) -> bool {
        matches!(self, RowAction::DeleteClient)
    }
}

/// What the shell should do after a row action. Navigation is only
/// requested here; performing it belongs to the routing shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Navigate(String),
    ConfirmationRequested(DeletionTicket),
    UnknownClient,
}
