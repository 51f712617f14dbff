//! App Context

use std::sync::Arc;

use jiff::SignedDuration;
use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        carts::{CartsService, SqliteCartsService},
        merges::{MergeStashService, SqliteMergeStashService},
        products::{ProductsService, SqliteProductsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to run database migrations")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub merge_stash: Arc<dyn MergeStashService>,
}

impl AppContext {
    #[must_use]
    pub fn new(
        products: Arc<dyn ProductsService>,
        carts: Arc<dyn CartsService>,
        merge_stash: Arc<dyn MergeStashService>,
    ) -> Self {
        Self {
            products,
            carts,
            merge_stash,
        }
    }

    /// Build application context from a database URL, running migrations.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting or migrating fails.
    pub async fn from_database_url(
        url: &str,
        stash_ttl: SignedDuration,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool).await?;

        let db = Db::new(pool);

        Ok(Self {
            products: Arc::new(SqliteProductsService::new(db.clone())),
            carts: Arc::new(SqliteCartsService::new(db.clone())),
            merge_stash: Arc::new(SqliteMergeStashService::new(db, stash_ttl)),
        })
    }
}
