//! Nimbus request filtering
//!
//! One process-wide filtering policy (blocked-domain ruleset plus an
//! allow-list that must never be blocked), attached to each network
//! session exactly once. The host runtime does the actual request
//! interception; this crate owns the policy, the per-session binding
//! bookkeeping, and the per-session block counters.

mod binder;
mod error;
mod ruleset;

pub use binder::SessionFilterBinder;
pub use error::FilterError;
pub use ruleset::FilterRuleset;

pub type Result<T> = std::result::Result<T, FilterError>;
