//! Merge stash service.

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::merges::{errors::MergeStashError, repository::SqliteMergeStashRepository},
    guest::GuestEntry,
};

/// How long a staged guest cart survives before redeeming it fails.
pub const DEFAULT_STASH_TTL: SignedDuration = SignedDuration::from_secs(15 * 60);

#[derive(Debug, Clone)]
pub struct SqliteMergeStashService {
    db: Db,
    ttl: SignedDuration,
    repository: SqliteMergeStashRepository,
}

impl SqliteMergeStashService {
    #[must_use]
    pub fn new(db: Db, ttl: SignedDuration) -> Self {
        Self {
            db,
            ttl,
            repository: SqliteMergeStashRepository::new(),
        }
    }
}

#[async_trait]
impl MergeStashService for SqliteMergeStashService {
    async fn stash(&self, entries: Vec<GuestEntry>) -> Result<Uuid, MergeStashError> {
        let payload = serde_json::to_string(&entries)?;

        let now = Timestamp::now();
        let expires_at = now.checked_add(self.ttl).map_err(MergeStashError::Expiry)?;

        // Tokens are bearer credentials; random v4, not time-ordered v7.
        let token = Uuid::new_v4();

        let mut tx = self.db.begin().await?;

        self.repository
            .create(
                &mut tx,
                token,
                &payload,
                now.as_millisecond(),
                expires_at.as_millisecond(),
            )
            .await?;

        tx.commit().await?;

        Ok(token)
    }

    async fn redeem(&self, token: Uuid) -> Result<Vec<GuestEntry>, MergeStashError> {
        let now = Timestamp::now();

        let mut tx = self.db.begin().await?;

        let purged = self
            .repository
            .purge_expired(&mut tx, now.as_millisecond())
            .await?;

        if purged > 0 {
            tracing::debug!(purged, "dropped expired merge stashes");
        }

        let payload = self
            .repository
            .take(&mut tx, token, now.as_millisecond())
            .await?
            .ok_or(MergeStashError::NotFound)?;

        tx.commit().await?;

        Ok(serde_json::from_str(&payload)?)
    }
}

#[automock]
#[async_trait]
pub trait MergeStashService: Send + Sync {
    /// Stage guest cart entries under a fresh single-use token.
    async fn stash(&self, entries: Vec<GuestEntry>) -> Result<Uuid, MergeStashError>;

    /// Return and consume the staged entries for `token`. Unknown,
    /// already-redeemed and expired tokens are all `NotFound`.
    async fn redeem(&self, token: Uuid) -> Result<Vec<GuestEntry>, MergeStashError>;
}
