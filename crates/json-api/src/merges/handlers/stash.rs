//! Stash Guest Cart Handler

use std::sync::Arc;

use salvo::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use jaggery_app::guest::GuestEntry;

use crate::{
    envelope::Envelope, errors::ApiError, extensions::*, merges::errors::stash_into_api_error,
    state::State,
};

/// Stash Guest Cart Request
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct StashRequest {
    pub entries: Vec<GuestEntry>,
}

/// Stash Created Response
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct StashResponse {
    /// Single-use token redeemable after sign-in completes.
    pub token: Uuid,
}

/// Stash Guest Cart Handler
///
/// Stages a guest cart server-side so it survives the sign-in redirect.
#[salvo::handler]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match run(req, depot).await {
        Ok(envelope) => res.render(Json(envelope)),
        Err(error) => error.write_to(res),
    }
}

async fn run(req: &mut Request, depot: &Depot) -> Result<Envelope<StashResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let request: StashRequest = req.parse_json().await.map_err(|error| {
        debug!("rejected stash payload: {error}");

        ApiError::bad_request("Invalid data provided!")
    })?;

    let token = state
        .app
        .merge_stash
        .stash(request.entries)
        .await
        .map_err(stash_into_api_error)?;

    Ok(Envelope::success(StashResponse { token }))
}
