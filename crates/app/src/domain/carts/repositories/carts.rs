//! Carts Repository

use jiff::Timestamp;
use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, sqlite::SqliteRow};
use uuid::Uuid;

use crate::domain::rows::try_get_timestamp;

const GET_CART_BY_USER_SQL: &str = include_str!("../sql/get_cart_by_user.sql");
const CREATE_CART_SQL: &str = include_str!("../sql/create_cart.sql");
const TOUCH_CART_SQL: &str = include_str!("../sql/touch_cart.sql");

/// The cart row itself, before its lines are loaded.
#[derive(Debug, Clone)]
pub(crate) struct CartRow {
    pub uuid: Uuid,
    pub user: Uuid,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteCartsRepository;

impl SqliteCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_by_user(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user: Uuid,
    ) -> Result<Option<CartRow>, sqlx::Error> {
        query_as::<Sqlite, CartRow>(GET_CART_BY_USER_SQL)
            .bind(user)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Lazily create the user's cart on first add.
    pub(crate) async fn create(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user: Uuid,
        now: Timestamp,
    ) -> Result<CartRow, sqlx::Error> {
        let row = CartRow {
            uuid: Uuid::now_v7(),
            user,
            created_at: now,
            updated_at: now,
        };

        query(CREATE_CART_SQL)
            .bind(row.uuid)
            .bind(row.user)
            .bind(now.as_millisecond())
            .bind(now.as_millisecond())
            .execute(&mut **tx)
            .await?;

        Ok(row)
    }

    pub(crate) async fn touch(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        cart: Uuid,
        now: Timestamp,
    ) -> Result<(), sqlx::Error> {
        query(TOUCH_CART_SQL)
            .bind(now.as_millisecond())
            .bind(cart)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, SqliteRow> for CartRow {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            user: row.try_get("user_uuid")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
