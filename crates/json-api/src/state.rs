//! Shared handler state

use jaggery_app::context::AppContext;

/// Application services injected into every request's depot.
#[derive(Clone)]
pub(crate) struct State {
    /// Wired products, carts and merge-stash services.
    pub(crate) app: AppContext,
}

impl From<AppContext> for State {
    fn from(app: AppContext) -> Self {
        Self { app }
    }
}
