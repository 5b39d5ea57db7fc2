//! Client directory: record store, live filtering, and a confirmed
//! deletion workflow behind one controller.

pub mod actions;
pub mod controller;
pub mod deletion;
pub mod filter;
pub mod notify;
pub mod seed;
pub mod shared_directory;
pub mod store;

pub use actions::{ActionOutcome, RowAction};
pub use controller::{DeletionOutcome, DirectoryController};
pub use deletion::{DeletionState, DeletionTicket, DeletionWorkflow};
pub use notify::{ChangeSink, NoopSink, Notifier, ToastQueue};
pub use shared_directory::SharedDirectory;
pub use store::ClientStore;
