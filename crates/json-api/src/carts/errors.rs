//! Errors

use tracing::error;

use jaggery_app::domain::carts::CartsServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: CartsServiceError) -> ApiError {
    match error {
        CartsServiceError::InvalidQuantity
        | CartsServiceError::PackingRequired
        | CartsServiceError::InvalidReference
        | CartsServiceError::MissingRequiredData
        | CartsServiceError::InvalidData => ApiError::bad_request(error.to_string()),
        CartsServiceError::AlreadyExists => ApiError::conflict(error.to_string()),
        CartsServiceError::ProductNotFound
        | CartsServiceError::NotFound
        | CartsServiceError::ItemNotFound => ApiError::not_found(error.to_string()),
        CartsServiceError::Sql(source) => {
            error!("cart storage failure: {source}");

            ApiError::internal()
        }
        CartsServiceError::InvalidPrice(source) => {
            error!("cart price conversion failure: {source}");

            ApiError::internal()
        }
    }
}
