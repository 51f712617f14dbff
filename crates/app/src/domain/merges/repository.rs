//! Merge Stash Repository

use sqlx::{Row, Sqlite, Transaction, query};
use uuid::Uuid;

const CREATE_STASH_SQL: &str = include_str!("sql/create_stash.sql");
const GET_STASH_SQL: &str = include_str!("sql/get_stash.sql");
const DELETE_STASH_SQL: &str = include_str!("sql/delete_stash.sql");
const PURGE_EXPIRED_SQL: &str = include_str!("sql/purge_expired_stashes.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteMergeStashRepository;

impl SqliteMergeStashRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        token: Uuid,
        payload: &str,
        created_at_ms: i64,
        expires_at_ms: i64,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_STASH_SQL)
            .bind(token)
            .bind(payload)
            .bind(created_at_ms)
            .bind(expires_at_ms)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Fetch and delete in one transaction so a token redeems at most once.
    pub(crate) async fn take(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        token: Uuid,
        now_ms: i64,
    ) -> Result<Option<String>, sqlx::Error> {
        let row = query(GET_STASH_SQL)
            .bind(token)
            .bind(now_ms)
            .fetch_optional(&mut **tx)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let payload: String = row.try_get("payload")?;

        query(DELETE_STASH_SQL)
            .bind(token)
            .execute(&mut **tx)
            .await?;

        Ok(Some(payload))
    }

    pub(crate) async fn purge_expired(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        now_ms: i64,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(PURGE_EXPIRED_SQL)
            .bind(now_ms)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}
