//! Single-slot token cache owned by a broker.

// self
use crate::{
	_prelude::*,
	auth::CachedToken,
};

/// Thread-safe single-slot cache holding at most one [`CachedToken`].
///
/// Reads and replacements are atomic with respect to each other. The lock is only held long
/// enough to clone or swap the record and never across an `.await`.
#[derive(Debug, Default)]
pub struct TokenCache(RwLock<Option<CachedToken>>);
impl TokenCache {
	/// Creates a cache pre-populated with `token`.
	pub fn with_token(token: CachedToken) -> Self {
		Self(RwLock::new(Some(token)))
	}

	/// Returns a copy of the cached record if it is still fresh at `now`.
	pub fn fresh(&self, now: OffsetDateTime) -> Option<CachedToken> {
		self.0.read().as_ref().filter(|token| token.is_fresh_at(now)).cloned()
	}

	/// Returns a copy of the cached record, fresh or stale.
	pub fn snapshot(&self) -> Option<CachedToken> {
		self.0.read().clone()
	}

	/// Replaces the slot, returning the previous record.
	pub fn replace(&self, token: CachedToken) -> Option<CachedToken> {
		self.0.write().replace(token)
	}

	/// Empties the slot, returning the previous record.
	pub fn clear(&self) -> Option<CachedToken> {
		self.0.write().take()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;
	use crate::auth::TokenPayload;

	fn token(access: &str, expires_at: OffsetDateTime) -> CachedToken {
		let body = format!("{{\"access_token\":\"{access}\",\"expires_in\":3600}}");
		let payload = TokenPayload::parse(body.as_bytes()).expect("Fixture payload should parse.");

		CachedToken::new(payload, expires_at)
	}

	#[test]
	fn fresh_honors_the_stale_instant() {
		let expires_at = macros::datetime!(2025-11-10 12:00 UTC);
		let cache = TokenCache::with_token(token("cached", expires_at));
		let hit = cache
			.fresh(expires_at - Duration::seconds(10))
			.expect("Token should be fresh ten seconds before expiry.");

		assert_eq!(hit.payload.access_token(), "cached");
		assert!(cache.fresh(expires_at).is_none());
		assert!(cache.fresh(expires_at + Duration::minutes(5)).is_none());
		// Stale entries stay in the slot until a refresh replaces them.
		assert!(cache.snapshot().is_some());
	}

	#[test]
	fn replace_keeps_a_single_slot() {
		let expires_at = macros::datetime!(2025-11-10 12:00 UTC);
		let cache = TokenCache::default();

		assert!(cache.replace(token("first", expires_at)).is_none());

		let previous = cache
			.replace(token("second", expires_at + Duration::hours(1)))
			.expect("First token should be returned when replaced.");

		assert_eq!(previous.payload.access_token(), "first");
		assert_eq!(
			cache.snapshot().map(|token| token.payload.access_token().to_owned()),
			Some("second".into())
		);
		assert!(cache.clear().is_some());
		assert!(cache.snapshot().is_none());
	}
}
