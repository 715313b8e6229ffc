//! Client Credentials flow orchestration with caching + singleflight guards.
//!
//! The broker exposes [`Broker::get_token`] so callers reuse one cached access token until it
//! goes stale. Credentials are validated before the cache is consulted. A fresh cached record
//! is served without I/O; otherwise callers queue on a broker-wide singleflight guard, re-check
//! the cache, and only the first one calls the provider. Failed refreshes leave the cache as
//! it was, so the next call retries.

// self
use crate::{
	_prelude::*,
	auth::{CachedToken, TokenPayload},
	flows::{Broker, common},
	http::{TokenHttpClient, TokenHttpRequest},
	obs::{self, FlowOutcome, FlowSpan},
};

impl<C> Broker<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Returns a payload that is valid for at least the provider's expiry buffer.
	///
	/// # Errors
	///
	/// - [`Error::Config`] when the client id or secret is missing; no cache lookup or network
	///   call happens in that case.
	/// - [`Error::Upstream`] when the provider cannot be reached, answers with a non-`2xx`
	///   status, or returns a malformed body.
	pub async fn get_token(&self) -> Result<TokenPayload> {
		let span = FlowSpan::new(&self.descriptor.id, "get_token");

		obs::record_flow_outcome(FlowOutcome::Attempt);

		let result = span.instrument(self.resolve_token()).await;

		match result {
			Ok((outcome, token)) => {
				obs::record_flow_outcome(outcome);
				obs::trace_flow_outcome(outcome, Some(token.expires_at), None);

				Ok(token.payload)
			},
			Err(e) => {
				obs::record_flow_outcome(FlowOutcome::Failure);
				obs::trace_flow_outcome(FlowOutcome::Failure, None, Some(&e));

				Err(e)
			},
		}
	}

	async fn resolve_token(&self) -> Result<(FlowOutcome, CachedToken)> {
		let authorization = self.credentials.basic_authorization()?;

		if let Some(token) = self.cache.fresh(OffsetDateTime::now_utc()) {
			return Ok((FlowOutcome::CacheHit, token));
		}

		let _singleflight = self.refresh_guard.lock().await;

		// Another caller may have refreshed while this one waited on the guard.
		if let Some(token) = self.cache.fresh(OffsetDateTime::now_utc()) {
			return Ok((FlowOutcome::CacheHit, token));
		}

		let request =
			TokenHttpRequest::client_credentials(self.descriptor.token_endpoint.clone(), authorization);
		let response = self.http_client.post_form(request).await?;
		let payload = common::parse_token_response(response)?;
		let issued_at = OffsetDateTime::now_utc();
		let expires_at = common::stale_instant(&payload, issued_at, &self.descriptor.quirks);
		let token = CachedToken::new(payload, expires_at);

		// A validity at or below the buffer would be stale on arrival; hand it out once.
		if token.is_fresh_at(issued_at) {
			self.cache.replace(token.clone());
		}

		Ok((FlowOutcome::Refreshed, token))
	}
}
