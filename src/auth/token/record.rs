//! Token payloads returned by the provider and the cache record wrapping them.

// crates.io
use serde_json::{Map, Value};
// self
use crate::{_prelude::*, error::UpstreamError};

/// Token response body exactly as the provider returned it.
///
/// The raw JSON text is kept so callers receive the payload verbatim; the parsed object backs
/// field lookups such as `access_token` and `expires_in`.
#[derive(Clone)]
pub struct TokenPayload {
	raw: Arc<str>,
	fields: Arc<Map<String, Value>>,
}
impl TokenPayload {
	/// Parses a token endpoint response body.
	///
	/// The body must be a JSON object carrying a string `access_token`.
	pub fn parse(body: &[u8]) -> Result<Self, UpstreamError> {
		let mut de = serde_json::Deserializer::from_slice(body);
		let fields: Map<String, Value> = serde_path_to_error::deserialize(&mut de)?;

		de.end().map_err(|source| UpstreamError::TokenResponseParse {
			path: ".".into(),
			source,
		})?;

		if !fields.get("access_token").is_some_and(Value::is_string) {
			return Err(UpstreamError::MissingAccessToken);
		}

		Ok(Self { raw: String::from_utf8_lossy(body).into(), fields: Arc::new(fields) })
	}

	/// Raw JSON text of the response body.
	pub fn as_json(&self) -> &str {
		&self.raw
	}

	/// Parsed JSON object.
	pub fn fields(&self) -> &Map<String, Value> {
		&self.fields
	}

	/// Access token string. Callers must avoid logging it.
	pub fn access_token(&self) -> &str {
		self.fields.get("access_token").and_then(Value::as_str).unwrap_or_default()
	}

	/// Provider-declared validity, or `None` when `expires_in` is absent or not a number.
	///
	/// Values outside the representable range saturate instead of falling back to a default.
	pub fn expires_in(&self) -> Option<Duration> {
		let value = self.fields.get("expires_in")?;

		if let Some(secs) = value.as_i64() {
			return Some(Duration::seconds(secs));
		}
		if value.is_u64() {
			return Some(Duration::MAX);
		}

		value.as_f64().map(Duration::saturating_seconds_f64)
	}
}
impl PartialEq for TokenPayload {
	fn eq(&self, other: &Self) -> bool {
		self.raw == other.raw
	}
}
impl Eq for TokenPayload {}
impl Debug for TokenPayload {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenPayload")
			.field("access_token", &"<redacted>")
			.field("expires_in", &self.expires_in())
			.field("fields", &self.fields.keys().collect::<Vec<_>>())
			.finish()
	}
}

/// Single cached token: the provider payload plus the instant it goes stale.
#[derive(Clone, PartialEq, Eq)]
pub struct CachedToken {
	/// Provider payload returned to callers.
	pub payload: TokenPayload,
	/// Instant at and after which the entry is stale.
	pub expires_at: OffsetDateTime,
}
impl CachedToken {
	/// Wraps a payload with its stale instant.
	pub fn new(payload: TokenPayload, expires_at: OffsetDateTime) -> Self {
		Self { payload, expires_at }
	}

	/// Returns `true` while `instant` is strictly before the stale instant.
	pub fn is_fresh_at(&self, instant: OffsetDateTime) -> bool {
		instant < self.expires_at
	}

	/// Time left before the entry goes stale, clamped at zero.
	pub fn remaining_at(&self, instant: OffsetDateTime) -> Duration {
		let remaining = self.expires_at - instant;

		if remaining.is_negative() { Duration::ZERO } else { remaining }
	}
}
impl Debug for CachedToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CachedToken")
			.field("payload", &self.payload)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}
