use thiserror::Error;

use crate::article::DocId;

#[derive(Error, Debug)]
pub enum StoreError {
    /// A create asked for an id that is already taken. The store is left
    /// untouched: no append, no index update, no counter advance.
    #[error("article id {0} already exists")]
    DuplicateId(DocId),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
