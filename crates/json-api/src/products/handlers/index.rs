//! Product Index Handler

use std::sync::Arc;

use salvo::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    envelope::Envelope, errors::ApiError, extensions::*, products::errors::into_api_error,
    products::handlers::get::ProductResponse, state::State,
};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ProductsResponse {
    /// The list of products
    pub products: Vec<ProductResponse>,
}

/// Product Index Handler
///
/// Returns all products.
#[salvo::handler]
pub(crate) async fn handler(depot: &mut Depot, res: &mut Response) {
    match run(depot).await {
        Ok(envelope) => res.render(Json(envelope)),
        Err(error) => error.write_to(res),
    }
}

async fn run(depot: &Depot) -> Result<Envelope<ProductsResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .list_products()
        .await
        .map_err(into_api_error)?;

    Ok(Envelope::success(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;
    use uuid::Uuid;

    use jaggery_app::domain::products::{MockProductsService, ProductsServiceError};

    use crate::test_helpers::{make_product, products_service};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        products_service(products, Router::with_path("products").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_empty_list() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(|| Ok(vec![]));

        products.expect_get_product().never();
        products.expect_create_product().never();
        products.expect_update_product().never();
        products.expect_delete_product().never();

        let body: Envelope<ProductsResponse> = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await
            .take_json()
            .await?;

        assert!(body.success);
        assert!(
            body.data.as_ref().is_some_and(|d| d.products.is_empty()),
            "expected an empty product list"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_index_returns_products() -> TestResult {
        let uuid_a = Uuid::now_v7();
        let uuid_b = Uuid::now_v7();

        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(move || Ok(vec![make_product(uuid_a), make_product(uuid_b)]));

        products.expect_get_product().never();
        products.expect_create_product().never();
        products.expect_update_product().never();
        products.expect_delete_product().never();

        let body: Envelope<ProductsResponse> = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await
            .take_json()
            .await?;

        let uuids: Vec<Uuid> = body
            .data
            .map(|d| d.products.into_iter().map(|p| p.uuid).collect())
            .unwrap_or_default();

        assert_eq!(uuids, vec![uuid_a, uuid_b]);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_invalid_data_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(|| Err(ProductsServiceError::InvalidData));

        products.expect_get_product().never();
        products.expect_create_product().never();
        products.expect_update_product().never();
        products.expect_delete_product().never();

        let res = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
