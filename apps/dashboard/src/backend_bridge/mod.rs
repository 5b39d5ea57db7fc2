//! Bridge from the in-memory directory to the persistence backend.

pub mod commands;
pub mod runtime;
pub mod sink;
