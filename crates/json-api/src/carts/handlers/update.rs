//! Update Cart Quantity Handler

use std::sync::Arc;

use salvo::prelude::*;
use tracing::debug;

use crate::{
    carts::{
        errors::into_api_error,
        handlers::{add::CartItemRequest, get::CartResponse},
    },
    envelope::Envelope,
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Update Cart Quantity Handler
///
/// Overwrites the quantity of the `(product, packing size)` line. The
/// "at least 1, else delete" rule belongs to the client; a zero quantity
/// is rejected.
#[salvo::handler]
#[tracing::instrument(name = "cart.update", skip_all)]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match run(req, depot).await {
        Ok(envelope) => res.render(Json(envelope)),
        Err(error) => error.write_to(res),
    }
}

async fn run(req: &mut Request, depot: &Depot) -> Result<Envelope<CartResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let request: CartItemRequest = req.parse_json().await.map_err(|error| {
        debug!("rejected update-cart payload: {error}");

        ApiError::bad_request("Invalid data provided!")
    })?;

    let packing_size = request.packing.map(|p| p.size);

    let cart = state
        .app
        .carts
        .update_quantity(request.user, request.product, request.quantity, packing_size)
        .await
        .map_err(into_api_error)?;

    Ok(Envelope::success(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;
    use uuid::Uuid;

    use jaggery_app::domain::carts::{CartsServiceError, MockCartsService};

    use crate::test_helpers::{carts_service, make_cart_with_line};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("cart/items").put(handler))
    }

    #[tokio::test]
    async fn test_update_overwrites_quantity_by_packing_size() -> TestResult {
        let user = Uuid::now_v7();
        let product = Uuid::now_v7();
        let cart = make_cart_with_line(user, 7);

        let mut carts = MockCartsService::new();

        carts
            .expect_update_quantity()
            .once()
            .withf(move |u, p, quantity, size| {
                *u == user
                    && *p == product
                    && *quantity == 7
                    && size.as_deref() == Some("500g")
            })
            .return_once(move |_, _, _, _| Ok(cart));

        carts.expect_add_to_cart().never();
        carts.expect_fetch_cart().never();
        carts.expect_delete_item().never();

        let mut res = TestClient::put("http://example.com/cart/items")
            .json(&json!({
                "user": user,
                "product": product,
                "quantity": 7,
                "packing": { "size": "500g", "price": 550 },
            }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Envelope<CartResponse> = res.take_json().await?;

        assert!(body.success);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_absent_line_returns_404() -> TestResult {
        let user = Uuid::now_v7();
        let product = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts
            .expect_update_quantity()
            .once()
            .return_once(|_, _, _, _| Err(CartsServiceError::ItemNotFound));

        carts.expect_add_to_cart().never();
        carts.expect_fetch_cart().never();
        carts.expect_delete_item().never();

        let res = TestClient::put("http://example.com/cart/items")
            .json(&json!({ "user": user, "product": product, "quantity": 2 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
