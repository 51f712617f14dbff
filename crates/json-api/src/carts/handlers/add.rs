//! Add To Cart Handler

use std::sync::Arc;

use salvo::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use jaggery::PackingSelection;

use crate::{
    carts::{errors::into_api_error, handlers::get::CartResponse},
    envelope::Envelope,
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Cart Item Request, shared by add and update.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CartItemRequest {
    pub user: Uuid,
    pub product: Uuid,
    pub quantity: u32,
    #[serde(default)]
    pub packing: Option<PackingSelection>,
}

/// Add To Cart Handler
///
/// Adds onto the `(product, packing size)` line, creating the user's
/// cart on first add, and returns the full populated cart.
#[salvo::handler]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match run(req, depot).await {
        Ok(envelope) => res.render(Json(envelope)),
        Err(error) => error.write_to(res),
    }
}

async fn run(req: &mut Request, depot: &Depot) -> Result<Envelope<CartResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let request: CartItemRequest = req.parse_json().await.map_err(|error| {
        debug!("rejected add-to-cart payload: {error}");

        ApiError::bad_request("Invalid data provided!")
    })?;

    let cart = state
        .app
        .carts
        .add_to_cart(
            request.user,
            request.product,
            request.quantity,
            request.packing,
        )
        .await
        .map_err(into_api_error)?;

    Ok(Envelope::success(cart.into()))
}
