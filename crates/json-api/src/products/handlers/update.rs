//! Update Product Handler

use std::sync::Arc;

use salvo::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use jaggery::PackingSizes;
use jaggery_app::domain::products::models::ProductUpdate;

use crate::{
    envelope::Envelope,
    errors::ApiError,
    extensions::*,
    products::{errors::into_api_error, handlers::get::ProductResponse},
    state::State,
};

/// Update Product Request
///
/// Omitted fields keep their stored values; `packing_sizes` replaces the
/// variant list wholesale.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct UpdateProductRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub price: Option<u64>,
    #[serde(default)]
    pub sale_price: Option<u64>,
    #[serde(default)]
    pub total_stock: Option<u64>,
    #[serde(default)]
    pub packing_sizes: Option<PackingSizes>,
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(request: UpdateProductRequest) -> Self {
        ProductUpdate {
            title: request.title,
            image: request.image,
            description: request.description,
            category: request.category,
            brand: request.brand,
            price: request.price,
            sale_price: request.sale_price,
            total_stock: request.total_stock,
            packing_sizes: request.packing_sizes,
        }
    }
}

/// Product Update Handler
#[salvo::handler]
#[tracing::instrument(name = "products.update", skip_all)]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match run(req, depot).await {
        Ok(envelope) => res.render(Json(envelope)),
        Err(error) => error.write_to(res),
    }
}

async fn run(req: &mut Request, depot: &Depot) -> Result<Envelope<ProductResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = req
        .param::<Uuid>("product")
        .ok_or_else(|| ApiError::bad_request("Product id is mandatory!"))?;

    let request: UpdateProductRequest = req.parse_json().await.map_err(|error| {
        debug!("rejected update-product payload: {error}");

        ApiError::bad_request("Invalid data provided!")
    })?;

    let updated = state
        .app
        .products
        .update_product(product, request.into())
        .await
        .map_err(into_api_error)?;

    tracing::info!(product_uuid = %product, price = updated.price, "updated product");

    Ok(Envelope::success(updated.into()))
}
