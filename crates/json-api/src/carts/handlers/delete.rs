//! Delete Cart Item Handler

use std::sync::Arc;

use salvo::prelude::*;
use uuid::Uuid;

use crate::{
    carts::{errors::into_api_error, handlers::get::CartResponse},
    envelope::Envelope,
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Delete Cart Item Handler
///
/// Removes exactly the line matching `(product, ?packing)`. Without the
/// `packing` query parameter only the product's default slot is
/// addressed; variant lines need their size spelled out.
#[salvo::handler]
#[tracing::instrument(name = "cart.delete_item", skip_all)]
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
    let product = req
        .param::<Uuid>("product")
        .ok_or_else(|| ApiError::bad_request("Product id is mandatory!"))?;

    let packing_size = req.query::<String>("packing");

    let cart = state
        .app
        .carts
        .delete_item(user, product, packing_size)
        .await
        .map_err(into_api_error)?;

    Ok(Envelope::success(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use jaggery_app::domain::carts::{CartsServiceError, MockCartsService};

    use crate::test_helpers::{carts_service, make_cart_with_line};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(
            carts,
            Router::with_path("cart/{user}/items/{product}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_delete_passes_packing_size_from_query() -> TestResult {
        let user = Uuid::now_v7();
        let product = Uuid::now_v7();
        let cart = make_cart_with_line(user, 1);

        let mut carts = MockCartsService::new();

        carts
            .expect_delete_item()
            .once()
            .withf(move |u, p, size| {
                *u == user && *p == product && size.as_deref() == Some("500g")
            })
            .return_once(move |_, _, _| Ok(cart));

        carts.expect_add_to_cart().never();
        carts.expect_fetch_cart().never();
        carts.expect_update_quantity().never();

        let res = TestClient::delete(format!(
            "http://example.com/cart/{user}/items/{product}?packing=500g"
        ))
        .send(&make_service(carts))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_without_query_targets_default_slot() -> TestResult {
        let user = Uuid::now_v7();
        let product = Uuid::now_v7();
        let cart = make_cart_with_line(user, 1);

        let mut carts = MockCartsService::new();

        carts
            .expect_delete_item()
            .once()
            .withf(move |u, p, size| *u == user && *p == product && size.is_none())
            .return_once(move |_, _, _| Ok(cart));

        carts.expect_add_to_cart().never();
        carts.expect_fetch_cart().never();
        carts.expect_update_quantity().never();

        let res = TestClient::delete(format!("http://example.com/cart/{user}/items/{product}"))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_absent_line_returns_404() -> TestResult {
        let user = Uuid::now_v7();
        let product = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts
            .expect_delete_item()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::ItemNotFound));

        carts.expect_add_to_cart().never();
        carts.expect_fetch_cart().never();
        carts.expect_update_quantity().never();

        let res = TestClient::delete(format!("http://example.com/cart/{user}/items/{product}"))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_invalid_ids_return_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_delete_item().never();
        carts.expect_add_to_cart().never();
        carts.expect_fetch_cart().never();
        carts.expect_update_quantity().never();

        let res = TestClient::delete("http://example.com/cart/123/items/456")
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
