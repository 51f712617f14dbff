//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use smallvec::smallvec;
use uuid::Uuid;

use jaggery_app::{
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            models::{Cart, CartItem},
        },
        merges::MockMergeStashService,
        products::{MockProductsService, models::Product},
    },
};

use crate::state::State;

pub(crate) fn make_product(uuid: Uuid) -> Product {
    Product {
        uuid,
        title: "Palm Jaggery".to_string(),
        image: String::new(),
        description: String::new(),
        category: "jaggery".to_string(),
        brand: String::new(),
        price: 300,
        sale_price: 0,
        total_stock: 10,
        packing_sizes: smallvec![],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart_with_line(user: Uuid, quantity: u32) -> Cart {
    Cart {
        uuid: Uuid::now_v7(),
        user,
        items: vec![CartItem {
            product: Uuid::now_v7(),
            title: "Palm Jaggery".to_string(),
            image: String::new(),
            price: 300,
            sale_price: 0,
            quantity,
            packing: None,
        }],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_add_to_cart().never();
    carts.expect_fetch_cart().never();
    carts.expect_update_quantity().never();
    carts.expect_delete_item().never();

    carts
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

fn strict_stash_mock() -> MockMergeStashService {
    let mut stash = MockMergeStashService::new();

    stash.expect_stash().never();
    stash.expect_redeem().never();

    stash
}

fn make_state(
    products: MockProductsService,
    carts: MockCartsService,
    stash: MockMergeStashService,
) -> Arc<State> {
    Arc::new(State::from(AppContext::new(
        Arc::new(products),
        Arc::new(carts),
        Arc::new(stash),
    )))
}

fn make_service(state: Arc<State>, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state)).push(route))
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    make_service(
        make_state(strict_products_mock(), carts, strict_stash_mock()),
        route,
    )
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    make_service(
        make_state(products, strict_carts_mock(), strict_stash_mock()),
        route,
    )
}

pub(crate) fn merges_service(stash: MockMergeStashService, route: Router) -> Service {
    make_service(
        make_state(strict_products_mock(), strict_carts_mock(), stash),
        route,
    )
}

pub(crate) fn merge_service(
    stash: MockMergeStashService,
    carts: MockCartsService,
    route: Router,
) -> Service {
    make_service(make_state(strict_products_mock(), carts, stash), route)
}
