//! Test context for service-level integration tests.

use sqlx::Row;
use tempfile::TempDir;
use uuid::Uuid;

use crate::{
    database::{self, Db},
    domain::{
        carts::SqliteCartsService,
        merges::{DEFAULT_STASH_TTL, SqliteMergeStashService},
        products::SqliteProductsService,
    },
};

/// Real services over a throwaway on-disk SQLite database.
pub(crate) struct TestContext {
    pub db: Db,
    pub products: SqliteProductsService,
    pub carts: SqliteCartsService,
    pub merge_stash: SqliteMergeStashService,
    _dir: TempDir,
}

impl TestContext {
    pub(crate) async fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create test database directory");
        let url = format!("sqlite://{}", dir.path().join("test.db").display());

        let pool = database::connect(&url)
            .await
            .expect("failed to open test database");

        database::migrate(&pool)
            .await
            .expect("failed to migrate test database");

        let db = Db::new(pool);

        Self {
            products: SqliteProductsService::new(db.clone()),
            carts: SqliteCartsService::new(db.clone()),
            merge_stash: SqliteMergeStashService::new(db.clone(), DEFAULT_STASH_TTL),
            db,
            _dir: dir,
        }
    }

    /// Persisted line count for a cart, bypassing the service layer.
    pub(crate) async fn cart_item_rows(&self, cart: Uuid) -> i64 {
        let mut tx = self.db.begin().await.expect("failed to begin transaction");

        let row = sqlx::query("SELECT COUNT(*) AS line_count FROM cart_items WHERE cart_uuid = ?")
            .bind(cart)
            .fetch_one(&mut *tx)
            .await
            .expect("failed to count cart items");

        tx.commit().await.expect("failed to commit transaction");

        row.try_get("line_count")
            .expect("failed to decode line count")
    }
}
