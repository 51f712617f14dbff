//! Cart merger.
//!
//! Reconciles a guest cart into a user's server cart right after sign-in
//! by replaying each guest entry as an additive add. Replay is
//! sequential, stops at the first failure and is never rolled back: the
//! system accepts at-least-once semantics, so retrying a partially
//! applied merge can double quantities. The single-use merge stash keeps
//! a token-driven retry from replaying entries it already delivered.

use thiserror::Error;
use uuid::Uuid;

use crate::{
    domain::{
        carts::{CartsService, CartsServiceError, models::Cart},
        merges::{MergeStashError, MergeStashService},
    },
    guest::{CartStorage, GuestCartStore, GuestEntry},
};

/// Result of replaying guest entries into a server cart.
#[derive(Debug)]
pub struct MergeOutcome {
    /// Entries applied before the merge finished or failed.
    pub applied: usize,

    /// Server cart state after the last applied entry; `None` when there
    /// was nothing to merge.
    pub cart: Option<Cart>,
}

#[derive(Debug, Error)]
pub enum MergeError {
    #[error(transparent)]
    Stash(#[from] MergeStashError),

    #[error(transparent)]
    Carts(#[from] CartsServiceError),
}

/// Replay guest entries into the user's server cart, additively.
///
/// # Errors
///
/// Propagates the first [`CartsServiceError`]; entries applied before
/// the failure stay applied.
pub async fn merge_into(
    carts: &dyn CartsService,
    user: Uuid,
    entries: &[GuestEntry],
) -> Result<MergeOutcome, CartsServiceError> {
    let mut cart = None;
    let mut applied = 0;

    for entry in entries {
        cart = Some(
            carts
                .add_to_cart(user, entry.product, entry.quantity, entry.packing.clone())
                .await?,
        );

        applied += 1;
    }

    Ok(MergeOutcome { applied, cart })
}

/// Drain the guest cart into the user's server cart.
///
/// Guest storage is cleared only after every entry lands; on failure it
/// is left intact so the merge can be retried.
///
/// # Errors
///
/// Propagates the first [`CartsServiceError`] from the replay.
pub async fn drain_guest_cart<S: CartStorage>(
    guest: &GuestCartStore<S>,
    carts: &dyn CartsService,
    user: Uuid,
) -> Result<MergeOutcome, CartsServiceError> {
    let entries = guest.entries();

    let outcome = merge_into(carts, user, &entries).await?;

    guest.clear();

    Ok(outcome)
}

/// Redeem a pending-merge token and replay its entries into the user's
/// cart. The stash is consumed on redeem, so a repeated call with the
/// same token merges nothing instead of doubling quantities.
///
/// # Errors
///
/// [`MergeError::Stash`] when the token is unknown, used or expired;
/// [`MergeError::Carts`] when the replay fails part-way.
pub async fn redeem_and_merge(
    stash: &dyn MergeStashService,
    carts: &dyn CartsService,
    user: Uuid,
    token: Uuid,
) -> Result<MergeOutcome, MergeError> {
    let entries = stash.redeem(token).await?;

    let outcome = merge_into(carts, user, &entries).await?;

    Ok(outcome)
}
