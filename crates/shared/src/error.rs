use thiserror::Error;

use crate::domain::ClientId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    #[error("client id '{id}' is already in use")]
    DuplicateId { id: ClientId },
    #[error("loaded client at position {position} has a blank id")]
    BlankId { position: usize },
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;
