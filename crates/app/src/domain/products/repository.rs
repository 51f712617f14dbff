//! Products Repository

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, sqlite::SqliteRow};
use uuid::Uuid;

use jaggery::{PackingSize, PackingSizes};

use crate::domain::rows::{amount_to_i64, try_get_amount, try_get_timestamp};

use super::models::Product;

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");

const LIST_PACKINGS_SQL: &str = include_str!("sql/list_packings.sql");
const GET_PACKINGS_SQL: &str = include_str!("sql/get_packings.sql");
const CREATE_PACKING_SQL: &str = include_str!("sql/create_packing.sql");
const DELETE_PACKINGS_SQL: &str = include_str!("sql/delete_packings.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteProductsRepository;

impl SqliteProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let mut products = query_as::<Sqlite, Product>(LIST_PRODUCTS_SQL)
            .fetch_all(&mut **tx)
            .await?;

        let packing_rows = query(LIST_PACKINGS_SQL).fetch_all(&mut **tx).await?;

        let mut by_product: FxHashMap<Uuid, PackingSizes> = FxHashMap::default();

        for row in &packing_rows {
            let (product_uuid, packing) = packing_from_row(row)?;

            by_product.entry(product_uuid).or_default().push(packing);
        }

        for product in &mut products {
            if let Some(packings) = by_product.remove(&product.uuid) {
                product.packing_sizes = packings;
            }
        }

        Ok(products)
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: Uuid,
    ) -> Result<Option<Product>, sqlx::Error> {
        let Some(mut found) = query_as::<Sqlite, Product>(GET_PRODUCT_SQL)
            .bind(product)
            .fetch_optional(&mut **tx)
            .await?
        else {
            return Ok(None);
        };

        found.packing_sizes = self.get_packings(tx, product).await?;

        Ok(Some(found))
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: &Product,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_PRODUCT_SQL)
            .bind(product.uuid)
            .bind(&product.title)
            .bind(&product.image)
            .bind(&product.description)
            .bind(&product.category)
            .bind(&product.brand)
            .bind(bind_amount(product.price, "price")?)
            .bind(bind_amount(product.sale_price, "sale_price")?)
            .bind(bind_amount(product.total_stock, "total_stock")?)
            .bind(product.created_at.as_millisecond())
            .bind(product.updated_at.as_millisecond())
            .execute(&mut **tx)
            .await?;

        self.insert_packings(tx, product.uuid, &product.packing_sizes)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: &Product,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_PRODUCT_SQL)
            .bind(&product.title)
            .bind(&product.image)
            .bind(&product.description)
            .bind(&product.category)
            .bind(&product.brand)
            .bind(bind_amount(product.price, "price")?)
            .bind(bind_amount(product.sale_price, "sale_price")?)
            .bind(bind_amount(product.total_stock, "total_stock")?)
            .bind(product.updated_at.as_millisecond())
            .bind(product.uuid)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        query(DELETE_PACKINGS_SQL)
            .bind(product.uuid)
            .execute(&mut **tx)
            .await?;

        self.insert_packings(tx, product.uuid, &product.packing_sizes)
            .await?;

        Ok(rows_affected)
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    async fn get_packings(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: Uuid,
    ) -> Result<PackingSizes, sqlx::Error> {
        let rows = query(GET_PACKINGS_SQL)
            .bind(product)
            .fetch_all(&mut **tx)
            .await?;

        let mut packings = SmallVec::new();

        for row in &rows {
            let (_, packing) = packing_from_row(row)?;

            packings.push(packing);
        }

        Ok(packings)
    }

    async fn insert_packings(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: Uuid,
        packings: &[PackingSize],
    ) -> Result<(), sqlx::Error> {
        for (position, packing) in packings.iter().enumerate() {
            query(CREATE_PACKING_SQL)
                .bind(product)
                .bind(i64::try_from(position).unwrap_or(i64::MAX))
                .bind(&packing.size)
                .bind(bind_amount(packing.price, "price")?)
                .bind(bind_amount(packing.sale_price, "sale_price")?)
                .bind(bind_amount(packing.stock, "stock")?)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }
}

fn bind_amount(amount: u64, col: &str) -> Result<i64, sqlx::Error> {
    amount_to_i64(amount).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

fn packing_from_row(row: &SqliteRow) -> Result<(Uuid, PackingSize), sqlx::Error> {
    let product_uuid: Uuid = row.try_get("product_uuid")?;

    let packing = PackingSize {
        size: row.try_get("size")?,
        price: try_get_amount(row, "price")?,
        sale_price: try_get_amount(row, "sale_price")?,
        stock: try_get_amount(row, "stock")?,
    };

    Ok((product_uuid, packing))
}

impl<'r> FromRow<'r, SqliteRow> for Product {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            title: row.try_get("title")?,
            image: row.try_get("image")?,
            description: row.try_get("description")?,
            category: row.try_get("category")?,
            brand: row.try_get("brand")?,
            price: try_get_amount(row, "price")?,
            sale_price: try_get_amount(row, "sale_price")?,
            total_stock: try_get_amount(row, "total_stock")?,
            packing_sizes: PackingSizes::new(),
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
