//! Errors

use tracing::error;

use jaggery_app::{domain::merges::MergeStashError, merge::MergeError};

use crate::{carts, errors::ApiError};

pub(crate) fn stash_into_api_error(error: MergeStashError) -> ApiError {
    match error {
        MergeStashError::NotFound => ApiError::not_found(error.to_string()),
        MergeStashError::Payload(source) => {
            error!("merge stash payload failure: {source}");

            ApiError::internal()
        }
        MergeStashError::Expiry(source) => {
            error!("merge stash expiry failure: {source}");

            ApiError::internal()
        }
        MergeStashError::Sql(source) => {
            error!("merge stash storage failure: {source}");

            ApiError::internal()
        }
    }
}

pub(crate) fn into_api_error(error: MergeError) -> ApiError {
    match error {
        MergeError::Stash(stash) => stash_into_api_error(stash),
        MergeError::Carts(carts) => carts::errors::into_api_error(carts),
    }
}
