//! Create Product Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use jaggery::PackingSizes;
use jaggery_app::domain::products::models::NewProduct;

use crate::{
    envelope::Envelope,
    errors::ApiError,
    extensions::*,
    products::{errors::into_api_error, handlers::get::ProductResponse},
    state::State,
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CreateProductRequest {
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub price: u64,
    #[serde(default)]
    pub sale_price: u64,
    #[serde(default)]
    pub total_stock: u64,
    #[serde(default)]
    pub packing_sizes: PackingSizes,
}

impl CreateProductRequest {
    fn into_new_product(self, uuid: Uuid) -> NewProduct {
        NewProduct {
            uuid,
            title: self.title,
            image: self.image,
            description: self.description,
            category: self.category,
            brand: self.brand,
            price: self.price,
            sale_price: self.sale_price,
            total_stock: self.total_stock,
            packing_sizes: self.packing_sizes,
        }
    }
}

/// Create Product Handler
///
/// Creates a product; price, sale price and stock are derived from the
/// packing variants when any are given.
#[salvo::handler]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match run(req, depot).await {
        Ok((uuid, envelope)) => {
            if res
                .add_header(LOCATION, format!("/products/{uuid}"), true)
                .is_err()
            {
                ApiError::internal().write_to(res);

                return;
            }

            res.status_code(StatusCode::CREATED);
            res.render(Json(envelope));
        }
        Err(error) => error.write_to(res),
    }
}

async fn run(
    req: &mut Request,
    depot: &Depot,
) -> Result<(Uuid, Envelope<ProductResponse>), ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let request: CreateProductRequest = req.parse_json().await.map_err(|error| {
        debug!("rejected create-product payload: {error}");

        ApiError::bad_request("Invalid data provided!")
    })?;

    let created = state
        .app
        .products
        .create_product(request.into_new_product(Uuid::now_v7()))
        .await
        .map_err(into_api_error)?;

    let uuid = created.uuid;

    Ok((uuid, Envelope::success(created.into())))
}
