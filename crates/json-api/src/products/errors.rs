//! Product Errors

use tracing::error;

use jaggery_app::domain::products::ProductsServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: ProductsServiceError) -> ApiError {
    match error {
        ProductsServiceError::AlreadyExists => ApiError::conflict("Product already exists"),
        ProductsServiceError::InvalidReference
        | ProductsServiceError::MissingRequiredData
        | ProductsServiceError::InvalidData => ApiError::bad_request(error.to_string()),
        ProductsServiceError::NotFound => ApiError::not_found("Product not found"),
        ProductsServiceError::Sql(source) => {
            error!("product storage failure: {source}");

            ApiError::internal()
        }
        ProductsServiceError::InvalidPrice(source) => {
            error!("product price conversion failure: {source}");

            ApiError::internal()
        }
    }
}
