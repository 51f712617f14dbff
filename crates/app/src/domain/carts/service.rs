//! Carts service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Sqlite, Transaction};
use uuid::Uuid;

use jaggery::PackingSelection;

use crate::{
    database::Db,
    domain::carts::{
        errors::CartsServiceError,
        models::Cart,
        repositories::{CartRow, SqliteCartItemsRepository, SqliteCartsRepository},
    },
};

#[derive(Debug, Clone)]
pub struct SqliteCartsService {
    db: Db,
    carts_repository: SqliteCartsRepository,
    items_repository: SqliteCartItemsRepository,
}

impl SqliteCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: SqliteCartsRepository::new(),
            items_repository: SqliteCartItemsRepository::new(),
        }
    }

    async fn populate(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        cart: CartRow,
        updated_at: Timestamp,
    ) -> Result<Cart, CartsServiceError> {
        let items = self
            .items_repository
            .populated_items(tx, cart.uuid)
            .await?;

        Ok(Cart {
            uuid: cart.uuid,
            user: cart.user,
            items,
            created_at: cart.created_at,
            updated_at,
        })
    }
}

#[async_trait]
impl CartsService for SqliteCartsService {
    async fn add_to_cart(
        &self,
        user: Uuid,
        product: Uuid,
        quantity: u32,
        packing: Option<PackingSelection>,
    ) -> Result<Cart, CartsServiceError> {
        if quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        let variants = self
            .items_repository
            .product_variant_count(&mut tx, product)
            .await?
            .ok_or(CartsServiceError::ProductNotFound)?;

        if variants > 0 && packing.is_none() {
            return Err(CartsServiceError::PackingRequired);
        }

        let now = Timestamp::now();

        let cart = match self.carts_repository.get_by_user(&mut tx, user).await? {
            Some(cart) => cart,
            None => self.carts_repository.create(&mut tx, user, now).await?,
        };

        self.items_repository
            .upsert_increment(&mut tx, cart.uuid, product, quantity, packing.as_ref(), now)
            .await?;

        self.carts_repository.touch(&mut tx, cart.uuid, now).await?;

        let populated = self.populate(&mut tx, cart, now).await?;

        tx.commit().await?;

        Ok(populated)
    }

    async fn fetch_cart(&self, user: Uuid) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .get_by_user(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let pruned = self.items_repository.prune_stale(&mut tx, cart.uuid).await?;

        if pruned > 0 {
            tracing::debug!(cart_uuid = %cart.uuid, pruned, "dropped cart lines for deleted products");
        }

        let updated_at = cart.updated_at;
        let populated = self.populate(&mut tx, cart, updated_at).await?;

        tx.commit().await?;

        Ok(populated)
    }

    async fn update_quantity(
        &self,
        user: Uuid,
        product: Uuid,
        quantity: u32,
        packing_size: Option<String>,
    ) -> Result<Cart, CartsServiceError> {
        if quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .get_by_user(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let now = Timestamp::now();

        let rows_affected = self
            .items_repository
            .set_quantity(
                &mut tx,
                cart.uuid,
                product,
                quantity,
                packing_size.as_deref(),
                now,
            )
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::ItemNotFound);
        }

        self.carts_repository.touch(&mut tx, cart.uuid, now).await?;

        let populated = self.populate(&mut tx, cart, now).await?;

        tx.commit().await?;

        Ok(populated)
    }

    async fn delete_item(
        &self,
        user: Uuid,
        product: Uuid,
        packing_size: Option<String>,
    ) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .get_by_user(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let rows_affected = self
            .items_repository
            .delete_item(&mut tx, cart.uuid, product, packing_size.as_deref())
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::ItemNotFound);
        }

        let now = Timestamp::now();

        self.carts_repository.touch(&mut tx, cart.uuid, now).await?;

        let populated = self.populate(&mut tx, cart, now).await?;

        tx.commit().await?;

        Ok(populated)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Add a line to the user's cart, creating the cart lazily. Adding
    /// an existing `(product, packing size)` key increments its quantity
    /// in place rather than duplicating the line.
    async fn add_to_cart(
        &self,
        user: Uuid,
        product: Uuid,
        quantity: u32,
        packing: Option<PackingSelection>,
    ) -> Result<Cart, CartsServiceError>;

    /// The user's cart, joined against current product display fields.
    /// Lines whose product was deleted are pruned and the pruning is
    /// persisted. Callers treat `NotFound` as an empty cart.
    async fn fetch_cart(&self, user: Uuid) -> Result<Cart, CartsServiceError>;

    /// Overwrite a line's quantity. The "`>= 1`, else delete" rule
    /// belongs to the caller; a zero quantity is rejected.
    async fn update_quantity(
        &self,
        user: Uuid,
        product: Uuid,
        quantity: u32,
        packing_size: Option<String>,
    ) -> Result<Cart, CartsServiceError>;

    /// Remove exactly the line matching the composite key. An omitted
    /// packing size addresses the product's default slot only, never
    /// every variant of the product.
    async fn delete_item(
        &self,
        user: Uuid,
        product: Uuid,
        packing_size: Option<String>,
    ) -> Result<Cart, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;
    use testresult::TestResult;

    use jaggery::PackingSize;

    use crate::{
        domain::products::{ProductsService, models::NewProduct},
        test::TestContext,
    };

    use super::*;

    fn plain_product(title: &str, price: u64, sale_price: u64) -> NewProduct {
        NewProduct {
            uuid: Uuid::now_v7(),
            title: title.to_string(),
            image: String::new(),
            description: String::new(),
            category: "jaggery".to_string(),
            brand: String::new(),
            price,
            sale_price,
            total_stock: 10,
            packing_sizes: smallvec![],
        }
    }

    fn variant_product(title: &str) -> NewProduct {
        let mut product = plain_product(title, 0, 0);

        product.packing_sizes = smallvec![
            PackingSize {
                size: "500g".to_string(),
                price: 550,
                sale_price: 500,
                stock: 5,
            },
            PackingSize {
                size: "1kg".to_string(),
                price: 1000,
                sale_price: 0,
                stock: 3,
            },
        ];

        product
    }

    fn selection(size: &str, price: u64, sale_price: u64) -> PackingSelection {
        PackingSelection {
            size: size.to_string(),
            price,
            sale_price,
        }
    }

    #[tokio::test]
    async fn add_creates_cart_lazily_and_populates_display_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let user = Uuid::now_v7();

        let product = ctx
            .products
            .create_product(plain_product("Palm Jaggery", 300, 0))
            .await?;

        let cart = ctx.carts.add_to_cart(user, product.uuid, 2, None).await?;

        assert_eq!(cart.user, user);
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].title, "Palm Jaggery");
        assert_eq!(cart.items[0].price, 300);
        assert_eq!(cart.items[0].quantity, 2);
        assert!(cart.items[0].packing.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn add_with_zero_quantity_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx
            .carts
            .add_to_cart(Uuid::now_v7(), Uuid::now_v7(), 0, None)
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidQuantity)),
            "expected InvalidQuantity, got {result:?}"
        );
    }

    #[tokio::test]
    async fn add_unknown_product_returns_product_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .carts
            .add_to_cart(Uuid::now_v7(), Uuid::now_v7(), 1, None)
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::ProductNotFound)),
            "expected ProductNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn add_variant_product_without_packing_is_blocked() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx
            .products
            .create_product(variant_product("Karupatti"))
            .await?;

        let result = ctx
            .carts
            .add_to_cart(Uuid::now_v7(), product.uuid, 1, None)
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::PackingRequired)),
            "expected PackingRequired, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn adding_same_composite_key_increments_one_line() -> TestResult {
        let ctx = TestContext::new().await;
        let user = Uuid::now_v7();

        let product = ctx
            .products
            .create_product(variant_product("Karupatti"))
            .await?;

        ctx.carts
            .add_to_cart(user, product.uuid, 2, Some(selection("500g", 550, 500)))
            .await?;

        let cart = ctx
            .carts
            .add_to_cart(user, product.uuid, 3, Some(selection("500g", 550, 500)))
            .await?;

        assert_eq!(cart.items.len(), 1, "same key must not duplicate");
        assert_eq!(cart.items[0].quantity, 5);

        Ok(())
    }

    #[tokio::test]
    async fn different_packing_sizes_are_distinct_lines() -> TestResult {
        let ctx = TestContext::new().await;
        let user = Uuid::now_v7();

        let product = ctx
            .products
            .create_product(variant_product("Karupatti"))
            .await?;

        ctx.carts
            .add_to_cart(user, product.uuid, 1, Some(selection("500g", 550, 500)))
            .await?;

        let cart = ctx
            .carts
            .add_to_cart(user, product.uuid, 1, Some(selection("1kg", 1000, 0)))
            .await?;

        assert_eq!(cart.items.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn fetch_cart_for_unknown_user_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.carts.fetch_cart(Uuid::now_v7()).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn fetch_prunes_lines_for_deleted_products_and_persists() -> TestResult {
        let ctx = TestContext::new().await;
        let user = Uuid::now_v7();

        let keeper = ctx
            .products
            .create_product(plain_product("Keeper", 200, 0))
            .await?;
        let doomed = ctx
            .products
            .create_product(plain_product("Doomed", 100, 0))
            .await?;

        ctx.carts.add_to_cart(user, keeper.uuid, 1, None).await?;
        ctx.carts.add_to_cart(user, doomed.uuid, 1, None).await?;

        ctx.products.delete_product(doomed.uuid).await?;

        let cart = ctx.carts.fetch_cart(user).await?;

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].product, keeper.uuid);

        // The pruning is persisted, not just filtered out of the view.
        let remaining = ctx.cart_item_rows(cart.uuid).await;

        assert_eq!(remaining, 1);

        Ok(())
    }

    #[tokio::test]
    async fn update_quantity_overwrites_the_line() -> TestResult {
        let ctx = TestContext::new().await;
        let user = Uuid::now_v7();

        let product = ctx
            .products
            .create_product(plain_product("Palm Jaggery", 300, 0))
            .await?;

        ctx.carts.add_to_cart(user, product.uuid, 2, None).await?;

        let cart = ctx
            .carts
            .update_quantity(user, product.uuid, 7, None)
            .await?;

        assert_eq!(cart.items[0].quantity, 7);

        Ok(())
    }

    #[tokio::test]
    async fn update_quantity_zero_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx
            .carts
            .update_quantity(Uuid::now_v7(), Uuid::now_v7(), 0, None)
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidQuantity)),
            "expected InvalidQuantity, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_quantity_for_absent_line_returns_item_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let user = Uuid::now_v7();

        let product = ctx
            .products
            .create_product(plain_product("Palm Jaggery", 300, 0))
            .await?;

        ctx.carts.add_to_cart(user, product.uuid, 1, None).await?;

        let result = ctx
            .carts
            .update_quantity(user, product.uuid, 2, Some("500g".to_string()))
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::ItemNotFound)),
            "expected ItemNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_only_the_matching_packing_size() -> TestResult {
        let ctx = TestContext::new().await;
        let user = Uuid::now_v7();

        let product = ctx
            .products
            .create_product(variant_product("Karupatti"))
            .await?;

        ctx.carts
            .add_to_cart(user, product.uuid, 1, Some(selection("500g", 550, 500)))
            .await?;
        ctx.carts
            .add_to_cart(user, product.uuid, 2, Some(selection("1kg", 1000, 0)))
            .await?;

        let cart = ctx
            .carts
            .delete_item(user, product.uuid, Some("500g".to_string()))
            .await?;

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].packing.as_ref().map(|p| p.size.as_str()), Some("1kg"));

        Ok(())
    }

    #[tokio::test]
    async fn delete_without_size_addresses_the_default_slot_only() -> TestResult {
        let ctx = TestContext::new().await;
        let user = Uuid::now_v7();

        let variant = ctx
            .products
            .create_product(variant_product("Karupatti"))
            .await?;

        ctx.carts
            .add_to_cart(user, variant.uuid, 1, Some(selection("500g", 550, 500)))
            .await?;

        let result = ctx.carts.delete_item(user, variant.uuid, None).await;

        assert!(
            matches!(result, Err(CartsServiceError::ItemNotFound)),
            "a missing size must not delete variant lines, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_from_unknown_cart_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .carts
            .delete_item(Uuid::now_v7(), Uuid::now_v7(), None)
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn packing_selection_prices_the_line() -> TestResult {
        let ctx = TestContext::new().await;
        let user = Uuid::now_v7();

        let product = ctx
            .products
            .create_product(variant_product("Karupatti"))
            .await?;

        let cart = ctx
            .carts
            .add_to_cart(user, product.uuid, 3, Some(selection("500g", 550, 500)))
            .await?;

        assert_eq!(cart.items[0].line_total(), 1500);
        assert_eq!(cart.total(), 1500);
        assert_eq!(cart.count(), 3);

        Ok(())
    }
}
