//! Merge stash errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MergeStashError {
    #[error("merge stash not found or expired")]
    NotFound,

    #[error("stash payload could not be encoded or decoded")]
    Payload(#[from] serde_json::Error),

    #[error("stash expiry could not be computed")]
    Expiry(#[source] jiff::Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for MergeStashError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        Self::Sql(error)
    }
}
