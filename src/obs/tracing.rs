// self
use crate::{_prelude::*, obs::FlowOutcome};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedFlow<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedFlow<F> = F;

/// A span builder used by broker flows.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Creates a new span tagged with the provided provider + stage.
	pub fn new(provider: &str, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("token_broker.flow", provider, stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (provider, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedFlow<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits one event describing how a token request resolved.
///
/// Only the error's `Display` output is logged; broker errors never render secrets.
pub fn trace_flow_outcome(
	outcome: FlowOutcome,
	expires_at: Option<OffsetDateTime>,
	error: Option<&Error>,
) {
	#[cfg(feature = "tracing")]
	{
		let label = outcome.as_str();

		match (outcome, error) {
			(_, Some(error)) => tracing::warn!(outcome = label, %error, "token request failed"),
			(FlowOutcome::CacheHit, None) =>
				tracing::debug!(outcome = label, ?expires_at, "served cached token"),
			(FlowOutcome::Refreshed, None) =>
				tracing::info!(outcome = label, ?expires_at, "refreshed token from provider"),
			(_, None) => tracing::trace!(outcome = label, "token request"),
		}
	}

	#[cfg(not(feature = "tracing"))]
	{
		let _ = (outcome, expires_at, error);
	}
}
