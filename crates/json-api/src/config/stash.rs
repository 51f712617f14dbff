//! Merge Stash Config

use clap::Args;
use jiff::SignedDuration;

/// Pending cart-merge stash settings.
#[derive(Debug, Args)]
pub struct StashConfig {
    /// Seconds a staged guest cart stays redeemable across a sign-in
    /// redirect.
    #[arg(long, env = "MERGE_STASH_TTL_SECONDS", default_value_t = 900)]
    pub merge_stash_ttl_seconds: i64,
}

impl StashConfig {
    /// Stash time-to-live as a duration.
    #[must_use]
    pub fn ttl(&self) -> SignedDuration {
        SignedDuration::from_secs(self.merge_stash_ttl_seconds)
    }
}
