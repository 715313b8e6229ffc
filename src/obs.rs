//! Optional observability helpers for broker flows.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit spans named `token_broker.flow` with a `stage` field plus one
//!   event per outcome (`debug` for cache hits, `info` for refreshes, `warn` for failures).
//! - Enable `metrics` to increment the `token_broker_request_total` counter for every
//!   attempt/cache hit/refresh/failure, labeled by `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each token request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to [`Broker::get_token`](crate::flows::Broker::get_token).
	Attempt,
	/// A fresh cached payload was served without contacting the provider.
	CacheHit,
	/// The provider issued a new token and the cache was replaced.
	Refreshed,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::CacheHit => "cache_hit",
			FlowOutcome::Refreshed => "refreshed",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
