//! Get Product Handler

use std::sync::Arc;

use salvo::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use jaggery::{PackingSizes, pricing};
use jaggery_app::domain::products::models::Product;

use crate::{
    envelope::Envelope, errors::ApiError, extensions::*, products::errors::into_api_error,
    state::State,
};

/// Product Response
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    /// Product title
    pub title: String,

    /// Product image
    pub image: String,

    /// Product description
    pub description: String,

    /// Product category
    pub category: String,

    /// Product brand
    pub brand: String,

    /// Base price; derived from variants when the product has any
    pub price: u64,

    /// Sale price; zero when no sale is in effect
    pub sale_price: u64,

    /// Aggregate stock; derived from variants when the product has any
    pub total_stock: u64,

    /// Discount badge percentage, zero when no sale is in effect
    pub discount_percent: u32,

    /// Packing variants, in display order
    pub packing_sizes: PackingSizes,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        let tag = product.price_tag();

        Self {
            uuid: product.uuid,
            title: product.title,
            image: product.image,
            description: product.description,
            category: product.category,
            brand: product.brand,
            price: product.price,
            sale_price: product.sale_price,
            total_stock: product.total_stock,
            discount_percent: pricing::discount_percent(tag.base, tag.effective()),
            packing_sizes: product.packing_sizes,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Get Product Handler
///
/// Returns a single product.
#[salvo::handler]
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

    let product = state
        .app
        .products
        .get_product(product)
        .await
        .map_err(into_api_error)?;

    Ok(Envelope::success(product.into()))
}
