//! Cart Items Repository

use jiff::Timestamp;
use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, sqlite::SqliteRow};
use uuid::Uuid;

use jaggery::PackingSelection;

use crate::domain::{
    carts::models::CartItem,
    rows::{amount_to_i64, try_get_amount, try_get_quantity},
};

/// Increment-in-place upsert keyed by `(cart, product, packing size)`,
/// so two racing adds both land instead of one overwriting the other.
const UPSERT_ITEM_SQL: &str = include_str!("../sql/upsert_cart_item.sql");

const SET_QUANTITY_SQL: &str = include_str!("../sql/set_cart_item_quantity.sql");
const DELETE_ITEM_SQL: &str = include_str!("../sql/delete_cart_item.sql");

/// Lines whose product no longer exists are dropped and the pruning is
/// persisted, self-healing carts against deleted products.
const PRUNE_STALE_SQL: &str = include_str!("../sql/prune_stale_cart_items.sql");

const POPULATED_ITEMS_SQL: &str = include_str!("../sql/get_populated_cart_items.sql");

/// Existence probe returning the product's variant count, used to block
/// adds that have not chosen a packing size for a variant product.
const PRODUCT_VARIANT_COUNT_SQL: &str = include_str!("../sql/get_product_variant_count.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteCartItemsRepository;

impl SqliteCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn product_variant_count(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: Uuid,
    ) -> Result<Option<i64>, sqlx::Error> {
        let row = query(PRODUCT_VARIANT_COUNT_SQL)
            .bind(product)
            .fetch_optional(&mut **tx)
            .await?;

        row.map(|row| row.try_get("variants")).transpose()
    }

    pub(crate) async fn upsert_increment(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        cart: Uuid,
        product: Uuid,
        quantity: u32,
        packing: Option<&PackingSelection>,
        now: Timestamp,
    ) -> Result<(), sqlx::Error> {
        let packing_price = packing
            .map(|p| bind_amount(p.price, "packing_price"))
            .transpose()?;
        let packing_sale_price = packing
            .map(|p| bind_amount(p.sale_price, "packing_sale_price"))
            .transpose()?;

        query(UPSERT_ITEM_SQL)
            .bind(cart)
            .bind(product)
            .bind(size_key(packing.map(|p| p.size.as_str())))
            .bind(packing_price)
            .bind(packing_sale_price)
            .bind(i64::from(quantity))
            .bind(now.as_millisecond())
            .bind(now.as_millisecond())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn set_quantity(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        cart: Uuid,
        product: Uuid,
        quantity: u32,
        size: Option<&str>,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SET_QUANTITY_SQL)
            .bind(i64::from(quantity))
            .bind(now.as_millisecond())
            .bind(cart)
            .bind(product)
            .bind(size_key(size))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        cart: Uuid,
        product: Uuid,
        size: Option<&str>,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ITEM_SQL)
            .bind(cart)
            .bind(product)
            .bind(size_key(size))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn prune_stale(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        cart: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(PRUNE_STALE_SQL)
            .bind(cart)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn populated_items(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        cart: Uuid,
    ) -> Result<Vec<CartItem>, sqlx::Error> {
        query_as::<Sqlite, CartItem>(POPULATED_ITEMS_SQL)
            .bind(cart)
            .fetch_all(&mut **tx)
            .await
    }
}

/// Column value for a packing size; the empty string is the product's
/// "default" slot.
fn size_key(size: Option<&str>) -> &str {
    size.unwrap_or("")
}

fn bind_amount(amount: u64, col: &str) -> Result<i64, sqlx::Error> {
    amount_to_i64(amount).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, SqliteRow> for CartItem {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let size: String = row.try_get("packing_size")?;

        let packing = if size.is_empty() {
            None
        } else {
            let price: Option<i64> = row.try_get("packing_price")?;
            let sale_price: Option<i64> = row.try_get("packing_sale_price")?;

            Some(PackingSelection {
                size,
                price: decode_optional_amount(price, "packing_price")?,
                sale_price: decode_optional_amount(sale_price, "packing_sale_price")?,
            })
        };

        Ok(Self {
            product: row.try_get("product_uuid")?,
            title: row.try_get("title")?,
            image: row.try_get("image")?,
            price: try_get_amount(row, "price")?,
            sale_price: try_get_amount(row, "sale_price")?,
            quantity: try_get_quantity(row, "quantity")?,
            packing,
        })
    }
}

fn decode_optional_amount(value: Option<i64>, col: &str) -> Result<u64, sqlx::Error> {
    let Some(value) = value else {
        return Ok(0);
    };

    u64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}
