//! Get Cart Handler

use std::sync::Arc;

use salvo::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use jaggery::PackingSelection;
use jaggery_app::domain::carts::models::{Cart, CartItem};

use crate::{
    carts::errors::into_api_error, envelope::Envelope, errors::ApiError, extensions::*,
    state::State,
};

/// Cart Response
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CartResponse {
    /// The unique identifier of the cart
    pub uuid: Uuid,

    /// The user owning the cart
    pub user: Uuid,

    /// The lines in the cart, with resolved product display fields
    pub items: Vec<CartItemResponse>,

    /// Total charged across all lines
    pub total: u64,

    /// The date and time the cart was created
    pub created_at: String,

    /// The date and time the cart was last updated
    pub updated_at: String,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        let total = cart.total();

        Self {
            uuid: cart.uuid,
            user: cart.user,
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
            total,
            created_at: cart.created_at.to_string(),
            updated_at: cart.updated_at.to_string(),
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CartItemResponse {
    /// The product this line refers to
    pub product: Uuid,

    /// Product title
    pub title: String,

    /// Product image
    pub image: String,

    /// Product base price
    pub price: u64,

    /// Product sale price; zero when none
    pub sale_price: u64,

    /// Line quantity
    pub quantity: u32,

    /// Chosen packing variant, if any
    pub packing: Option<PackingSelection>,

    /// Total charged for this line
    pub line_total: u64,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        let line_total = item.line_total();

        Self {
            product: item.product,
            title: item.title,
            image: item.image,
            price: item.price,
            sale_price: item.sale_price,
            quantity: item.quantity,
            packing: item.packing,
            line_total,
        }
    }
}

/// Get Cart Handler
///
/// Returns the user's cart. A missing cart is a 404 the client renders
/// as an empty cart.
#[salvo::handler]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match run(req, depot).await {
        Ok(envelope) => res.render(Json(envelope)),
        Err(error) => error.write_to(res),
    }
}

async fn run(req: &mut Request, depot: &Depot) -> Result<Envelope<CartResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = req
        .param::<Uuid>("user")
        .ok_or_else(|| ApiError::bad_request("User id is mandatory!"))?;

    let cart = state
        .app
        .carts
        .fetch_cart(user)
        .await
        .map_err(into_api_error)?;

    Ok(Envelope::success(cart.into()))
}
