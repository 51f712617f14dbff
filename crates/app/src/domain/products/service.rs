//! Products service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use uuid::Uuid;

use jaggery::VariantStats;

use crate::{
    database::Db,
    domain::products::{
        errors::ProductsServiceError,
        models::{NewProduct, Product, ProductUpdate},
        repository::SqliteProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct SqliteProductsService {
    db: Db,
    repository: SqliteProductsRepository,
}

impl SqliteProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for SqliteProductsService {
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: Uuid) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let found = self
            .repository
            .get_product(&mut tx, product)
            .await?
            .ok_or(ProductsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(found)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        if product.title.trim().is_empty() {
            return Err(ProductsServiceError::MissingRequiredData);
        }

        let now = Timestamp::now();

        let mut created = Product {
            uuid: product.uuid,
            title: product.title,
            image: product.image,
            description: product.description,
            category: product.category,
            brand: product.brand,
            price: product.price,
            sale_price: product.sale_price,
            total_stock: product.total_stock,
            packing_sizes: product.packing_sizes,
            created_at: now,
            updated_at: now,
        };

        apply_variant_stats(&mut created);

        let mut tx = self.db.begin().await?;

        self.repository.create_product(&mut tx, &created).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        product: Uuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut merged = self
            .repository
            .get_product(&mut tx, product)
            .await?
            .ok_or(ProductsServiceError::NotFound)?;

        if let Some(title) = update.title {
            merged.title = title;
        }
        if let Some(image) = update.image {
            merged.image = image;
        }
        if let Some(description) = update.description {
            merged.description = description;
        }
        if let Some(category) = update.category {
            merged.category = category;
        }
        if let Some(brand) = update.brand {
            merged.brand = brand;
        }
        if let Some(price) = update.price {
            merged.price = price;
        }
        if let Some(sale_price) = update.sale_price {
            merged.sale_price = sale_price;
        }
        if let Some(total_stock) = update.total_stock {
            merged.total_stock = total_stock;
        }
        if let Some(packing_sizes) = update.packing_sizes {
            merged.packing_sizes = packing_sizes;
        }

        merged.updated_at = Timestamp::now();

        apply_variant_stats(&mut merged);

        let rows_affected = self.repository.update_product(&mut tx, &merged).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(merged)
    }

    async fn delete_product(&self, product: Uuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

/// Recompute product-level price, sale price and stock from the packing
/// variants. The product's own fields stay authoritative only while it
/// has no variants.
fn apply_variant_stats(product: &mut Product) {
    if product.packing_sizes.is_empty() {
        return;
    }

    let stats = VariantStats::from_packings(&product.packing_sizes);

    product.price = stats.price;
    product.sale_price = stats.sale_price;
    product.total_stock = stats.total_stock;
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products.
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: Uuid) -> Result<Product, ProductsServiceError>;

    /// Creates a new product, deriving price/stock figures from its
    /// packing variants when it has any.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Updates a product, re-deriving variant figures.
    async fn update_product(
        &self,
        product: Uuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Deletes a product. Cart lines referencing it go stale and are
    /// pruned on the next cart fetch.
    async fn delete_product(&self, product: Uuid) -> Result<(), ProductsServiceError>;
}
