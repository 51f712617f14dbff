//! Redeem Merge Token Handler

use std::sync::Arc;

use salvo::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use jaggery_app::merge;

use crate::{
    carts::handlers::get::CartResponse, envelope::Envelope, errors::ApiError, extensions::*,
    merges::errors::into_api_error, state::State,
};

/// Redeem Merge Token Request
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct RedeemRequest {
    pub user: Uuid,
    pub token: Uuid,
}

/// Merge Response
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct MergeResponse {
    /// Guest entries replayed into the server cart.
    pub applied: usize,

    /// Server cart after the merge; absent when the stash was empty.
    pub cart: Option<CartResponse>,
}

/// Redeem Merge Token Handler
///
/// Consumes a pending-merge token and replays its staged guest entries
/// into the signed-in user's cart. A consumed token cannot replay again,
/// so retrying with the same token never doubles quantities.
#[salvo::handler]
#[tracing::instrument(name = "cart.merge", skip_all)]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match run(req, depot).await {
        Ok(envelope) => res.render(Json(envelope)),
        Err(error) => error.write_to(res),
    }
}

async fn run(req: &mut Request, depot: &Depot) -> Result<Envelope<MergeResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let request: RedeemRequest = req.parse_json().await.map_err(|error| {
        debug!("rejected merge payload: {error}");

        ApiError::bad_request("Invalid data provided!")
    })?;

    let outcome = merge::redeem_and_merge(
        state.app.merge_stash.as_ref(),
        state.app.carts.as_ref(),
        request.user,
        request.token,
    )
    .await
    .map_err(into_api_error)?;

    Ok(Envelope::success(MergeResponse {
        applied: outcome.applied,
        cart: outcome.cart.map(CartResponse::from),
    }))
}
