//! Delete Product Handler

use std::sync::Arc;

use salvo::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    envelope::Envelope, errors::ApiError, extensions::*, products::errors::into_api_error,
    state::State,
};

/// Product Deleted Response
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ProductDeletedResponse {
    /// Deleted product UUID
    pub uuid: Uuid,
}

/// Delete Product Handler
///
/// Deletes a product. Cart lines referencing it go stale and are pruned
/// on the next cart fetch.
#[salvo::handler]
#[tracing::instrument(name = "products.delete", skip_all)]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match run(req, depot).await {
        Ok(envelope) => res.render(Json(envelope)),
        Err(error) => error.write_to(res),
    }
}

async fn run(
    req: &mut Request,
    depot: &Depot,
) -> Result<Envelope<ProductDeletedResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = req
        .param::<Uuid>("product")
        .ok_or_else(|| ApiError::bad_request("Product id is mandatory!"))?;

    state
        .app
        .products
        .delete_product(product)
        .await
        .map_err(into_api_error)?;

    tracing::info!(product_uuid = %product, "deleted product");

    Ok(Envelope::success(ProductDeletedResponse { uuid: product }))
}
