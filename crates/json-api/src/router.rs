//! App Router

use salvo::Router;

use crate::{carts, merges, products};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(
            Router::with_path("cart")
                .push(
                    Router::with_path("items")
                        .post(carts::add::handler)
                        .put(carts::update::handler),
                )
                .push(
                    Router::with_path("merge")
                        .post(merges::redeem::handler)
                        .push(Router::with_path("stash").post(merges::stash::handler)),
                )
                .push(
                    Router::with_path("{user}")
                        .get(carts::get::handler)
                        .push(
                            Router::with_path("items/{product}").delete(carts::delete::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .get(products::get::handler)
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
}
